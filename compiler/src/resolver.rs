//! Per-field conversion strategy.
//!
//! The resolver looks at one protobuf field descriptor together with the
//! destination structure and decides how values move between both sides. The
//! decision is recorded once in a [`FieldSpec`]; nothing downstream inspects
//! descriptors again.

use struct_transformer_schema::{FieldDescriptor, FieldInfo, FieldType, Structure};
use tracing::{debug, info};

use crate::{
    error::TransformerError,
    naming::NamingRule,
    options::FieldOptions,
    registry::Registry,
    type_table::pair_for,
    types::{base_name, FieldKind, FieldSpec, Resolution},
    utils::{last_name, to_camel, type_alias},
};

pub const TIMESTAMP:    &str = ".google.protobuf.Timestamp";
pub const STRING_VALUE: &str = ".google.protobuf.StringValue";

/// Alias of the wire side of a registered message family.
pub const WIRE_ALIAS: &str = "Pb";

/// Destination type of a timestamp that needs no conversion.
const DOMAIN_TIME: &str = "time.Time";

/// Extra call argument forwarding transform options to nested calls.
const FORWARD_OPTS: &str = "opts...";

pub struct Resolver<'a> {
    naming:   &'a NamingRule,
    registry: &'a Registry,
}

impl<'a> Resolver<'a> {
    pub fn new(naming: &'a NamingRule, registry: &'a Registry) -> Self {
        Resolver { naming, registry }
    }

    /// Resolves one field against the destination field set.
    ///
    /// A skipped field yields `Resolution::Skip`. A field that cannot be found
    /// in `dest` and is not embedded fails with `FieldNotFound`.
    pub fn resolve(
        &self,
        field: &FieldDescriptor,
        dest: &Structure,
    ) -> Result<Resolution, TransformerError> {
        let raw = field
            .name
            .as_deref()
            .ok_or_else(|| TransformerError::NilInput("field name".to_string()))?;

        let opts = FieldOptions::extract(field.options.as_ref())?;
        if opts.skip {
            info!(field = raw, "field skipped");
            return Ok(Resolution::Skip(format!("field skipped: {}", raw)));
        }

        let names = self
            .naming
            .resolve(raw, opts.map_as.as_deref(), opts.map_to.as_deref());
        let info = dest.get(&names.dest);
        if info.is_none() && !opts.embed {
            return Err(TransformerError::FieldNotFound(names.dest));
        }

        let spec = match (field.type_, field.type_name.as_deref()) {
            (Some(FieldType::Message), Some(TIMESTAMP)) => {
                timestamp(names.dest, names.wire, info, opts.nullable)
            }
            (Some(FieldType::Message), Some(STRING_VALUE)) => {
                string_value(names.dest, names.wire, info)
            }
            (Some(FieldType::Message), Some(type_name)) => {
                self.sub_message(field, type_name, names.dest, names.wire, info, &opts)?
            }
            (Some(FieldType::Message), None) => {
                return Err(TransformerError::NilInput(format!("type name of field {:?}", raw)))
            }
            (Some(type_), type_name) => {
                // scalars are never embedded, their destination must exist
                let info = info.ok_or_else(|| TransformerError::FieldNotFound(names.dest.clone()))?;
                scalar(names.dest, names.wire, type_, type_name, info)
            }
            (None, _) => return Err(TransformerError::NilInput(format!("type of field {:?}", raw))),
        };

        debug!(
            field = raw,
            name = %spec.name,
            wire_name = %spec.wire_name,
            kind = ?spec.kind,
            "field resolved"
        );
        Ok(Resolution::Field(spec))
    }

    fn sub_message(
        &self,
        field: &FieldDescriptor,
        type_name: &str,
        name: String,
        wire_name: String,
        info: Option<&FieldInfo>,
        opts: &FieldOptions,
    ) -> Result<FieldSpec, TransformerError> {
        let dest_type = info.map(|i| i.type_.as_str()).unwrap_or_default();
        let sub = self.registry.get(type_name);

        // message holding a oneof: converted through the read/write helper pair
        if let Some(sub) = sub.filter(|s| !s.oneof_decl.is_empty()) {
            // nested holders are generated as `Outer_Inner`
            let wire_side = to_camel(&sub.go_name);
            let dest_side = to_camel(dest_type);
            return Ok(FieldSpec {
                name,
                wire_name,
                wire_type: sub.go_name.clone(),
                kind: FieldKind::Oneof {
                    read:       base_name(&wire_side, &dest_side),
                    write:      base_name(&dest_side, &wire_side),
                    decl:       sub.oneof_decl.clone(),
                    dest_alias: dest_side,
                },
                dest_pointer: info.map(|i| i.is_pointer).unwrap_or(false),
                wire_nullable: opts.nullable,
                use_package: false,
                extra_args: None,
            });
        }

        let (wire_side, mut dest_side) = match sub.filter(|s| !s.omitted()) {
            Some(sub) => (WIRE_ALIAS.to_string(), to_camel(&sub.target)),
            // no generated family exists, a hand-written one is expected
            None => (
                format!("{}{}", WIRE_ALIAS, to_camel(last_name(type_name))),
                to_camel(dest_type),
            ),
        };

        let list = field.is_repeated();
        if list && !dest_type.is_empty() {
            dest_side = to_camel(dest_type);
        }

        let name = if opts.embed {
            // an embedded field is named after its structure, which must be known
            if dest_side.is_empty() {
                return Err(TransformerError::FieldNotFound(name));
            }
            dest_side.clone()
        } else {
            name
        };

        Ok(FieldSpec {
            name,
            wire_name,
            wire_type: wire_side.clone(),
            kind: FieldKind::Message {
                wire_to_dest: base_name(&wire_side, &dest_side),
                dest_to_wire: base_name(&dest_side, &wire_side),
                list,
            },
            dest_pointer: info.map(|i| i.is_pointer).unwrap_or(false),
            wire_nullable: opts.nullable,
            use_package: false,
            extra_args: Some(FORWARD_OPTS.to_string()),
        })
    }
}

fn timestamp(name: String, wire_name: String, info: Option<&FieldInfo>, nullable: bool) -> FieldSpec {
    let default = FieldInfo::default();
    let info = info.unwrap_or(&default);

    if info.type_ == DOMAIN_TIME {
        return FieldSpec::copy(name, wire_name);
    }

    let mut dest_side = type_alias(&info.type_);
    if info.is_pointer {
        dest_side.push_str("Ptr");
    }
    let mut wire_side = "Time".to_string();
    if nullable {
        wire_side.push_str("Ptr");
    }

    convert(name, wire_name, base_name(&wire_side, &dest_side), base_name(&dest_side, &wire_side), true)
}

fn string_value(name: String, wire_name: String, info: Option<&FieldInfo>) -> FieldSpec {
    let dest_side = type_alias(info.map(|i| i.type_.as_str()).unwrap_or_default());
    let wire_side = "StringValue";

    convert(name, wire_name, base_name(wire_side, &dest_side), base_name(&dest_side, wire_side), true)
}

fn scalar(
    name: String,
    wire_name: String,
    type_: FieldType,
    type_name: Option<&str>,
    info: &FieldInfo,
) -> FieldSpec {
    let mut dest_alias = type_alias(&info.type_);
    if info.is_pointer {
        dest_alias.push_str("Ptr");
    }

    let pair = match pair_for(type_) {
        Some(pair) => pair,
        // enums and groups are named types on the wire side
        None => {
            let wire_alias = to_camel(last_name(type_name.unwrap_or_default()));
            return convert(
                name,
                wire_name,
                base_name(&wire_alias, &dest_alias),
                base_name(&dest_alias, &wire_alias),
                true,
            );
        }
    };

    let dest = dest_alias.to_lowercase();
    let wire = pair.wire.to_lowercase();
    let idiomatic = pair.dest.to_lowercase();

    if (!wire.is_empty() && dest == wire) || (wire.is_empty() && dest == idiomatic) {
        return FieldSpec::copy(name, wire_name);
    }

    if dest != idiomatic {
        let wire_alias = to_camel(pair.canonical());
        return convert(
            name,
            wire_name,
            base_name(&wire_alias, &dest_alias),
            base_name(&dest_alias, &wire_alias),
            true,
        );
    }

    // same kind, different width: a plain Go conversion
    convert(name, wire_name, dest, wire, pair.use_package)
}

fn convert(name: String, wire_name: String, wire_to_dest: String, dest_to_wire: String, use_package: bool) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Convert { wire_to_dest, dest_to_wire },
        use_package,
        ..FieldSpec::copy(name, wire_name)
    }
}
