//! Read/write helpers for wire messages holding a `string`/`int64` oneof.
//!
//! ```protobuf
//! message TheOne {          // wire type
//!   oneof the_decl {        // declaration
//!     string string_value = 1;
//!     int64 int64_value = 2;
//!   }
//! }
//! ```

use std::collections::BTreeSet;

use crate::{
    types::{Direction, FieldSpec, MessageMapping},
    utils::{quote, to_camel},
};

/// Everything needed to render one helper pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofHelper {
    /// Package prefix of the wire types, empty when local.
    pub package:   String,
    pub decl:      String,
    pub read:      String,
    pub write:     String,
    pub wire_type: String,
}

impl OneofHelper {
    /// Helper pair for a oneof field, `None` for any other kind.
    pub fn from_field(field: &FieldSpec, package: &str) -> Option<Self> {
        let decl = field.oneof_decl()?;
        Some(OneofHelper {
            package:   package.to_string(),
            decl:      to_camel(decl),
            read:      field.conversion(Direction::WireToDest)?.to_string(),
            write:     field.conversion(Direction::DestToWire)?.to_string(),
            wire_type: field.wire_type.clone(),
        })
    }

    fn interface(&self) -> String {
        format!("Oneof{}", self.decl)
    }

    fn qualified(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.package, name)
        }
    }

    pub fn render_interface(&self) -> String {
        format!(
            "type {} interface {{\n\tGetStringValue() string\n\tGetInt64Value() int64\n}}\n",
            self.interface()
        )
    }

    pub fn render_read(&self) -> String {
        format!(
            r#"func {read}(src {iface}) string {{
	if s := src.GetStringValue(); s != "" {{
		return s
	}}

	if i := src.GetInt64Value(); i != 0 {{
		return strconv.FormatInt(i, 10)
	}}

	return "<nil>"
}}
"#,
            read = self.read,
            iface = self.interface(),
        )
    }

    /// The write helper stores text that does not parse as an integer, or any
    /// text when `v` is the legacy marker, in the string variant.
    pub fn render_write(&self, legacy_version: &str) -> String {
        format!(
            r#"func {write}(s string, dst *{wire}, v string) {{
	i, err := strconv.ParseInt(s, 10, 64)
	if err != nil || v == {legacy} {{
		dst.{decl} = &{string_variant}{{StringValue: s}}
		return
	}}

	dst.{decl} = &{int_variant}{{Int64Value: i}}
}}
"#,
            write = self.write,
            wire = self.qualified(&self.wire_type),
            legacy = quote(legacy_version),
            decl = self.decl,
            string_variant = self.qualified(&format!("{}_StringValue", self.wire_type)),
            int_variant = self.qualified(&format!("{}_Int64Value", self.wire_type)),
        )
    }
}

/// Collects helper pairs for a whole output file.
///
/// Every interface and function is rendered once even when several messages
/// reference the same oneof.
#[derive(Debug, Default)]
pub struct OneofEmitter {
    interfaces: BTreeSet<String>,
    functions:  BTreeSet<String>,
    parts:      Vec<String>,
}

impl OneofEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds helpers for the first field of every oneof declaration of `mapping`.
    pub fn add_mapping(&mut self, mapping: &MessageMapping, legacy_version: &str) {
        for field in mapping.oneof_representatives() {
            if let Some(helper) = OneofHelper::from_field(field, &mapping.wire.package) {
                self.add(&helper, legacy_version);
            }
        }
    }

    pub fn add(&mut self, helper: &OneofHelper, legacy_version: &str) {
        if self.interfaces.insert(helper.interface()) {
            self.parts.push(helper.render_interface());
        }
        if self.functions.insert(helper.read.clone()) {
            self.parts.push(helper.render_read());
        }
        if self.functions.insert(helper.write.clone()) {
            self.parts.push(helper.render_write(legacy_version));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn render(&self) -> String {
        self.parts.join("\n")
    }
}
