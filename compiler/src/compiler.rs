use std::fmt;

use struct_transformer_schema::{
    Descriptor, FileDescriptor, Models, Request, Structure, StructureComment,
};
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    error::TransformerError,
    naming::NamingRule,
    oneof::OneofEmitter,
    options::{go_package_alias, go_package_path, string_option, GO_MODELS_FILE_PATH, GO_PACKAGE, GO_STRUCT},
    registry::Registry,
    resolver::{Resolver, WIRE_ALIAS},
    support::{render_support, SUPPORT_FILE},
    synth::Synthesizer,
    traits::ModelSource,
    types::{MessageMapping, Resolution, StructRef},
    utils::to_camel,
};

/// One output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path:    String,
    pub content: String,
}

/// A message whose functions were not generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub reason:  String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "message {:?}: {}", self.message, self.reason)
    }
}

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutput {
    pub file:        GeneratedFile,
    pub diagnostics: Vec<Diagnostic>,
}

/// What happened to one message.
#[derive(Debug)]
pub enum MessageOutcome {
    /// Resolved mapping plus comment lines written before its functions.
    Generated { mapping: MessageMapping, notes: Vec<String> },
    /// The message has no destination structure.
    Skipped(String),
    /// A message-local error stopped this message only.
    Failed { message: String, error: TransformerError },
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct Generation {
    pub files:       Vec<GeneratedFile>,
    pub diagnostics: Vec<Diagnostic>,
    /// Files whose processing was aborted, with the error.
    pub failures:    Vec<(String, TransformerError)>,
}

impl Generation {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Processes every requested file. A failing file is recorded and the
/// remaining files are still processed.
pub fn generate(
    request: &Request,
    source: &dyn ModelSource,
    config: &Config,
) -> Result<Generation, TransformerError> {
    let registry = Registry::collect(request)?;
    debug!(messages = registry.len(), "registry collected");

    let mut out = Generation::default();
    for file in request.files_to_generate() {
        let name = file.name.clone().unwrap_or_default();
        match generate_file(file, &registry, source, config) {
            Ok(Some(unit)) => {
                out.diagnostics.extend(unit.diagnostics);
                out.files.push(unit.file);
            }
            Ok(None) => info!(file = %name, "file skipped, no {} option", GO_MODELS_FILE_PATH),
            Err(e) => {
                error!(file = %name, error = %e, "file generation failed");
                out.failures.push((name, e));
            }
        }
    }

    if let Some(last) = out.files.last() {
        let path = join_path(parent(&last.path), SUPPORT_FILE);
        out.files.push(GeneratedFile {
            path,
            content: render_support(&config.package_name, &config.version),
        });
    }

    Ok(out)
}

/// Loads the models named by the file options and processes the file.
/// Returns `None` for files without a models path.
pub fn generate_file(
    file: &FileDescriptor,
    registry: &Registry,
    source: &dyn ModelSource,
    config: &Config,
) -> Result<Option<UnitOutput>, TransformerError> {
    let Some(models_path) = string_option(file.options.as_ref(), GO_MODELS_FILE_PATH)? else {
        return Ok(None);
    };
    let models = source.load(&models_path)?;
    process_file(file, registry, &models, config).map(Some)
}

/// Generates the transformer file for one proto file.
pub fn process_file(
    file: &FileDescriptor,
    registry: &Registry,
    models: &Models,
    config: &Config,
) -> Result<UnitOutput, TransformerError> {
    let name = file
        .name
        .as_deref()
        .ok_or_else(|| TransformerError::NilInput("file name".to_string()))?;

    let go_package = string_option(file.options.as_ref(), GO_PACKAGE)?;
    let wire_package = match &go_package {
        Some(p) => go_package_alias(p),
        None => file.package.as_deref().unwrap_or_default().replace('.', "_"),
    };
    let dest_package = match models.package.as_deref() {
        Some(p) if p != config.package_name => p.to_string(),
        _ => String::new(),
    };

    let unit = Unit {
        registry,
        models,
        config,
        naming: NamingRule::new(config.abbreviations.iter().cloned()),
        wire_package,
        dest_package,
    };

    let mut outcomes = Vec::new();
    for msg in &file.message_type {
        unit.walk(msg, &mut Vec::new(), &mut outcomes)?;
    }

    let synth = Synthesizer::new(config.helper_package.as_deref());
    let mut oneofs = OneofEmitter::new();
    let mut diagnostics = Vec::new();
    let mut body = Vec::new();

    for outcome in outcomes {
        match outcome {
            MessageOutcome::Generated { mapping, notes } => {
                let mut part = String::new();
                for note in notes {
                    part.push_str(&format!("// {}\n", note));
                }
                part.push_str(&synth.render(&mapping));
                oneofs.add_mapping(&mapping, &config.legacy_version);
                body.push(part);
            }
            MessageOutcome::Skipped(message) => {
                body.push(format!(
                    "// message {:?} has no option {:?}, skipped...\n",
                    message, GO_STRUCT
                ));
            }
            MessageOutcome::Failed { message, error } => {
                warn!(message = %message, error = %error, "message skipped");
                body.push(format!("// error: message {:?}: {}\n", message, error));
                diagnostics.push(Diagnostic {
                    message,
                    reason: error.to_string(),
                });
            }
        }
    }

    if !oneofs.is_empty() {
        body.push(oneofs.render());
    }

    let mut content = header(name, &config.package_name);
    let imports = imports(
        !oneofs.is_empty(),
        go_package.as_deref().map(|p| (unit.wire_package.as_str(), go_package_path(p))),
    );
    if !imports.is_empty() {
        content.push_str(&imports);
        content.push('\n');
    }
    content.push_str(&body.join("\n"));

    Ok(UnitOutput {
        file: GeneratedFile {
            path: output_path(name, &config.package_name, config.use_package_in_path),
            content,
        },
        diagnostics,
    })
}

struct Unit<'a> {
    registry:     &'a Registry,
    models:       &'a Models,
    config:       &'a Config,
    naming:       NamingRule,
    wire_package: String,
    dest_package: String,
}

impl Unit<'_> {
    /// Processes a message and then its nested messages, in declaration order.
    fn walk<'m>(
        &self,
        msg: &'m Descriptor,
        path: &mut Vec<&'m str>,
        out: &mut Vec<MessageOutcome>,
    ) -> Result<(), TransformerError> {
        let Some(name) = msg.name.as_deref() else {
            out.push(MessageOutcome::Failed {
                message: "<nil>".to_string(),
                error:   TransformerError::NilInput("message name".to_string()),
            });
            return Ok(());
        };

        path.push(name);
        let wire_name = path.join("_");
        match self.message(msg, &wire_name) {
            Ok(outcome) => out.push(outcome),
            Err(error) if error.is_message_local() => out.push(MessageOutcome::Failed {
                message: wire_name,
                error,
            }),
            Err(error) => return Err(error),
        }

        for nested in &msg.nested_type {
            self.walk(nested, path, out)?;
        }
        path.pop();
        Ok(())
    }

    fn message(&self, msg: &Descriptor, wire_name: &str) -> Result<MessageOutcome, TransformerError> {
        let target = string_option(msg.options.as_ref(), GO_STRUCT)?.filter(|t| !t.is_empty());
        let Some(target) = target else {
            info!(message = wire_name, "message has no {} option", GO_STRUCT);
            return Ok(MessageOutcome::Skipped(wire_name.to_string()));
        };

        let dest = self
            .models
            .lookup(&target)
            .ok_or_else(|| TransformerError::StructureNotFound(target.clone()))?;

        let mut notes = Vec::new();
        if self.config.debug {
            notes.extend(debug_lines(dest));
        }

        let resolver = Resolver::new(&self.naming, self.registry);
        let mut fields = Vec::with_capacity(msg.field.len());
        for field in &msg.field {
            match resolver.resolve(field, dest)? {
                Resolution::Field(spec) => {
                    if self.config.debug {
                        notes.push(format!(
                            "field {:?}: name {:?}, wire name {:?}, kind {:?}",
                            field.name.as_deref().unwrap_or_default(),
                            spec.name,
                            spec.wire_name,
                            spec.kind
                        ));
                    }
                    fields.push(spec);
                }
                Resolution::Skip(note) => notes.push(note),
            }
        }

        let mapping = MessageMapping {
            wire: StructRef::new(&self.wire_package, wire_name, WIRE_ALIAS),
            dest: StructRef::new(&self.dest_package, &target, to_camel(&target)),
            fields,
        };
        Ok(MessageOutcome::Generated { mapping, notes })
    }
}

fn debug_lines(dest: &Structure) -> Vec<String> {
    StructureComment(dest)
        .to_string()
        .lines()
        .map(|l| l.trim_start_matches("// ").to_string())
        .collect()
}

fn header(source: &str, package: &str) -> String {
    format!(
        "// Code generated by struct-transformer. DO NOT EDIT.\n// source: {}\n\npackage {}\n\n",
        source, package
    )
}

/// Import block. Model and helper packages are only known by alias and are
/// left to goimports.
fn imports(strconv: bool, wire: Option<(&str, &str)>) -> String {
    let mut groups = Vec::new();
    if strconv {
        groups.push("\t\"strconv\"\n".to_string());
    }
    if let Some((alias, path)) = wire {
        groups.push(format!("\t{} {:?}\n", alias, path));
    }
    if groups.is_empty() {
        return String::new();
    }
    format!("import (\n{})\n", groups.join("\n"))
}

/// `<dir>/<package>/<base>_transformer.go`
pub fn output_path(proto_name: &str, package: &str, use_package_in_path: bool) -> String {
    let dir = parent(proto_name);
    let file = proto_name.rsplit('/').next().unwrap_or(proto_name);
    let base = file.strip_suffix(".proto").unwrap_or(file);
    let file = format!("{}_transformer.go", base);

    if use_package_in_path {
        join_path(&join_path(dir, package), &file)
    } else {
        join_path(dir, &file)
    }
}

fn parent(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}
