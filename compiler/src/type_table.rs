use struct_transformer_schema::FieldType;

/// How a primitive wire type is represented on both sides.
///
/// `wire` is the Go type of the generated protobuf field when it differs from
/// the idiomatic model type `dest`, and is empty otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePair {
    pub wire:        &'static str,
    pub dest:        &'static str,
    pub use_package: bool,
}

impl TypePair {
    const fn new(wire: &'static str, dest: &'static str) -> Self {
        TypePair { wire, dest, use_package: false }
    }

    /// The Go type of the generated protobuf field.
    pub fn canonical(&self) -> &'static str {
        if self.wire.is_empty() {
            self.dest
        } else {
            self.wire
        }
    }
}

/// Returns the pairing for a primitive wire type, or `None` for messages,
/// groups and enums which are resolved by name.
pub fn pair_for(type_: FieldType) -> Option<TypePair> {
    let pair = match type_ {
        FieldType::Int32 | FieldType::Sint32 | FieldType::Sfixed32 => TypePair::new("int32", "int"),
        FieldType::Int64 | FieldType::Sint64 | FieldType::Sfixed64 => TypePair::new("int64", "int"),
        FieldType::Uint32 | FieldType::Fixed32 => TypePair::new("uint32", "uint"),
        FieldType::Uint64 | FieldType::Fixed64 => TypePair::new("uint64", "uint"),
        FieldType::Float => TypePair::new("", "float32"),
        FieldType::Double => TypePair::new("", "float64"),
        FieldType::Bool => TypePair::new("", "bool"),
        FieldType::String => TypePair::new("", "string"),
        // introspected slices report their element type
        FieldType::Bytes => TypePair::new("", "byte"),
        FieldType::Message | FieldType::Group | FieldType::Enum => return None,
    };
    Some(pair)
}
