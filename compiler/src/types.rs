use serde::Serialize;

/// Conversion strategy of one field, decided once by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Both sides share a representation; the value is copied as is.
    Copy,
    /// A named function or cast converts the value, e.g. `int64` or `TimeToNullsTime`.
    Convert {
        wire_to_dest: String,
        dest_to_wire: String,
    },
    /// A nested message converted with its own generated function family.
    /// Call names get pointer/value and list suffixes at the call site.
    Message {
        wire_to_dest: String,
        dest_to_wire: String,
        list:         bool,
    },
    /// A field whose wire message holds a oneof. Reading goes through
    /// `read`, writing through `write` after the structure is built.
    Oneof {
        read:       String,
        write:      String,
        decl:       String,
        dest_alias: String,
    },
}

/// One resolved field mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field name in the destination structure.
    pub name:          String,
    /// Field name in the generated protobuf structure.
    pub wire_name:     String,
    /// Alias of the wire type for message fields, empty for scalars.
    pub wire_type:     String,
    pub kind:          FieldKind,
    pub dest_pointer:  bool,
    pub wire_nullable: bool,
    /// The conversion functions live in the helper package.
    pub use_package:   bool,
    /// Extra arguments appended to the conversion call, e.g. `opts...`.
    pub extra_args:    Option<String>,
}

impl FieldSpec {
    /// A field copied without conversion.
    pub fn copy(name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        FieldSpec {
            name:          name.into(),
            wire_name:     wire_name.into(),
            wire_type:     String::new(),
            kind:          FieldKind::Copy,
            dest_pointer:  false,
            wire_nullable: false,
            use_package:   false,
            extra_args:    None,
        }
    }

    /// Base name of the conversion function for a direction, `None` when the
    /// value is copied.
    pub fn conversion(&self, direction: Direction) -> Option<&str> {
        let (forward, backward) = match &self.kind {
            FieldKind::Copy => return None,
            FieldKind::Convert { wire_to_dest, dest_to_wire }
            | FieldKind::Message { wire_to_dest, dest_to_wire, .. } => (wire_to_dest, dest_to_wire),
            FieldKind::Oneof { read, write, .. } => (read, write),
        };
        let name = match direction {
            Direction::WireToDest => forward,
            Direction::DestToWire => backward,
        };
        Some(name.as_str()).filter(|n| !n.is_empty())
    }

    pub fn oneof_decl(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Oneof { decl, .. } => Some(decl.as_str()),
            _ => None,
        }
    }

    pub fn is_oneof(&self) -> bool {
        self.oneof_decl().is_some()
    }

    /// Name of the field read from the source structure.
    pub fn source_name(&self, direction: Direction) -> &str {
        match direction {
            Direction::WireToDest => &self.wire_name,
            Direction::DestToWire => &self.name,
        }
    }

    /// Name of the field assigned in the destination structure.
    pub fn target_name(&self, direction: Direction) -> &str {
        match direction {
            Direction::WireToDest => &self.name,
            Direction::DestToWire => &self.wire_name,
        }
    }

    /// Pointer flags of the (source, target) values for a direction.
    pub fn pointers(&self, direction: Direction) -> (bool, bool) {
        match direction {
            Direction::WireToDest => (self.wire_nullable, self.dest_pointer),
            Direction::DestToWire => (self.dest_pointer, self.wire_nullable),
        }
    }
}

/// Result of resolving one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Field(FieldSpec),
    /// The field is not converted; the message carries the reason.
    Skip(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    WireToDest,
    DestToWire,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::WireToDest => Direction::DestToWire,
            Direction::DestToWire => Direction::WireToDest,
        }
    }
}

/// Identity of a structure on one side of a mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructRef {
    /// Package prefix, empty when the type is local to the generated file.
    pub package: String,
    /// Go type name.
    pub name:    String,
    /// Name used in function names, e.g. `Pb` or `Customer`.
    pub alias:   String,
}

impl StructRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>, alias: impl Into<String>) -> Self {
        StructRef {
            package: package.into(),
            name:    name.into(),
            alias:   alias.into(),
        }
    }

    /// Qualified Go type, e.g. `pb.Customer`.
    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

/// Resolved field list of one message plus both structure identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageMapping {
    pub wire:   StructRef,
    pub dest:   StructRef,
    pub fields: Vec<FieldSpec>,
}

impl MessageMapping {
    /// (source, target) structures for a direction.
    pub fn sides(&self, direction: Direction) -> (&StructRef, &StructRef) {
        match direction {
            Direction::WireToDest => (&self.wire, &self.dest),
            Direction::DestToWire => (&self.dest, &self.wire),
        }
    }

    /// First field of every distinct oneof declaration, in declared order.
    pub fn oneof_representatives(&self) -> Vec<&FieldSpec> {
        let mut seen: Vec<&str> = Vec::new();
        let mut out = Vec::new();
        for field in &self.fields {
            if let Some(decl) = field.oneof_decl() {
                if !seen.contains(&decl) {
                    seen.push(decl);
                    out.push(field);
                }
            }
        }
        out
    }
}

/// Shape of a generated function: pointer-ness of both sides and whether it
/// maps a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub src_ptr: bool,
    pub dst_ptr: bool,
    pub list:    bool,
}

impl Shape {
    pub const fn new(src_ptr: bool, dst_ptr: bool, list: bool) -> Self {
        Shape { src_ptr, dst_ptr, list }
    }

    /// Every shape of a function family, single variants first.
    pub const ALL: [Shape; 8] = [
        Shape::new(false, false, false),
        Shape::new(true, true, false),
        Shape::new(true, false, false),
        Shape::new(false, true, false),
        Shape::new(false, false, true),
        Shape::new(true, true, true),
        Shape::new(true, false, true),
        Shape::new(false, true, true),
    ];

    pub fn element(self) -> Shape {
        Shape { list: false, ..self }
    }

    /// Name suffix: `[Ptr|Val][PtrVal|ValPtr][List]`.
    pub fn suffix(self) -> &'static str {
        match (self.src_ptr, self.dst_ptr, self.list) {
            (false, false, false) => "",
            (true, true, false) => "Ptr",
            (true, false, false) => "PtrVal",
            (false, true, false) => "ValPtr",
            (false, false, true) => "ValList",
            (true, true, true) => "PtrList",
            (true, false, true) => "PtrValList",
            (false, true, true) => "ValPtrList",
        }
    }
}

/// Base name of a function family: `<source>To<target>`.
pub fn base_name(src_alias: &str, dst_alias: &str) -> String {
    format!("{}To{}", src_alias, dst_alias)
}

/// Full function name for a shape of a family.
pub fn function_name(base: &str, shape: Shape) -> String {
    format!("{}{}", base, shape.suffix())
}

/// Legacy list function name kept for older callers.
pub fn deprecated_list_name(base: &str) -> String {
    format!("{}List", base)
}
