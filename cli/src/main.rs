use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use struct_transformer_compiler::{
    generate, load_models, render_support, Config, FsModelSource, TransformerError,
};
use struct_transformer_schema::Request;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "struct-transformer")]
#[command(about = "Generate Go transformation functions between protobuf messages and models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate `<name>_transformer.go` files and `options.go` from a JSON request
    Generate {
        /// JSON `CodeGeneratorRequest` (reads stdin when omitted)
        #[arg(short, long)]
        request: Option<PathBuf>,

        /// Directory that `transformer.go_models_file_path` values are relative to
        #[arg(long, default_value = ".")]
        models_root: PathBuf,

        /// Directory generated files are written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Go package name of the generated files
        #[arg(short, long)]
        package: Option<String>,

        /// Package alias prefixed to helper calls
        #[arg(long)]
        helper_package: Option<String>,

        /// Add descriptive comments to generated files
        #[arg(long)]
        debug: bool,

        /// Default version marker for oneof write helpers
        #[arg(long)]
        version_marker: Option<String>,

        /// Version marker forcing the string variant on oneof writes
        #[arg(long)]
        legacy_version: Option<String>,

        /// Reserved abbreviation token, repeatable (replaces the defaults)
        #[arg(long = "abbreviation")]
        abbreviations: Vec<String>,

        /// Do not add the package name to output paths
        #[arg(long)]
        no_package_in_path: bool,
    },

    /// Print the structures found in a Go source file or models JSON
    Inspect {
        /// `.go` source or `.json` models document
        #[arg(short, long)]
        models: PathBuf,
    },

    /// Print the options support block
    Options {
        #[arg(short, long, default_value = "fallback")]
        package: String,

        #[arg(long, default_value = "v1")]
        version_marker: String,
    },
}

fn main() -> Result<(), TransformerError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            request,
            models_root,
            out_dir,
            package,
            helper_package,
            debug,
            version_marker,
            legacy_version,
            abbreviations,
            no_package_in_path,
        } => {
            let request = read_request(request.as_deref())?;

            let mut config = Config::default();
            if let Some(parameter) = &request.parameter {
                config.apply_parameters(parameter)?;
            }
            // flags win over request parameters
            if let Some(p) = package {
                config.package_name = p;
            }
            if helper_package.is_some() {
                config.helper_package = helper_package;
            }
            if debug {
                config.debug = true;
            }
            if let Some(v) = version_marker {
                config.version = v;
            }
            if let Some(v) = legacy_version {
                config.legacy_version = v;
            }
            if !abbreviations.is_empty() {
                config.abbreviations = abbreviations;
            }
            if no_package_in_path {
                config.use_package_in_path = false;
            }

            let generation = generate(&request, &FsModelSource::new(models_root), &config)?;

            for file in &generation.files {
                let path = out_dir.join(&file.path);
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir)?;
                }
                fs::write(&path, &file.content)?;
                info!(path = %path.display(), "file written");
                println!("Generated {}", path.display());
            }

            for diagnostic in &generation.diagnostics {
                eprintln!("warning: {}", diagnostic);
            }

            if !generation.is_success() {
                for (file, err) in &generation.failures {
                    eprintln!("error: {}: {}", file, err);
                }
                process::exit(1);
            }
            Ok(())
        }

        Commands::Inspect { models } => {
            let models = load_models(&models)?;
            println!("{}", serde_json::to_string_pretty(&models)?);
            Ok(())
        }

        Commands::Options { package, version_marker } => {
            print!("{}", render_support(&package, &version_marker));
            Ok(())
        }
    }
}

fn read_request(path: Option<&Path>) -> Result<Request, TransformerError> {
    let text = match path {
        Some(p) => fs::read_to_string(p)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}
