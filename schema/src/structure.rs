use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Information about one destination structure field, without its name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Declared type name, e.g. `int64`, `time.Time` or `Address`.
    /// For slices this is the element type.
    #[serde(rename = "type")]
    pub type_:      String,
    #[serde(default)]
    pub is_pointer: bool,
}

impl FieldInfo {
    pub fn new(type_: impl Into<String>) -> Self {
        FieldInfo { type_: type_.into(), is_pointer: false }
    }

    pub fn pointer(type_: impl Into<String>) -> Self {
        FieldInfo { type_: type_.into(), is_pointer: true }
    }
}

/// Field set of one destination structure, keyed by field name.
/// Embedded fields are keyed `embedded_<n>`.
pub type Structure = BTreeMap<String, FieldInfo>;

/// All structures found in a models source, keyed by structure name.
pub type StructureList = BTreeMap<String, Structure>;

/// Destination models: the package they live in plus their structures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Models {
    #[serde(default)]
    pub package:    Option<String>,
    #[serde(default)]
    pub structures: StructureList,
}

impl Models {
    pub fn lookup(&self, name: &str) -> Option<&Structure> {
        self.structures.get(name)
    }
}

/// Renders a structure as comment lines, used for debug annotations.
pub struct StructureComment<'a>(pub &'a Structure);

impl fmt::Display for StructureComment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Target struct fields:")?;
        for (name, info) in self.0 {
            writeln!(
                f,
                "// Field: {:?}, Type: {:?}, isPointer: {}",
                name, info.type_, info.is_pointer
            )?;
        }
        Ok(())
    }
}
