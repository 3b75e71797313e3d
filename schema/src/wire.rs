use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Option values keyed by their fully-qualified extension name, e.g.
/// `"transformer.go_struct"` or `"gogoproto.nullable"`.
pub type Options = BTreeMap<String, Value>;

/// A generation request, shaped like protoc's `CodeGeneratorRequest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub parameter:        Option<String>,
    #[serde(default)]
    pub file_to_generate: Vec<String>,
    #[serde(default)]
    pub proto_file:       Vec<FileDescriptor>,
}

impl Request {
    /// Files to generate output for. An empty `file_to_generate` list means every file.
    pub fn files_to_generate(&self) -> impl Iterator<Item = &FileDescriptor> {
        self.proto_file.iter().filter(move |f| {
            self.file_to_generate.is_empty()
                || f.name
                    .as_ref()
                    .map(|n| self.file_to_generate.contains(n))
                    .unwrap_or(false)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    #[serde(default)]
    pub name:         Option<String>,
    #[serde(default)]
    pub package:      Option<String>,
    #[serde(default)]
    pub message_type: Vec<Descriptor>,
    #[serde(default)]
    pub options:      Option<Options>,
}

/// One message declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(default)]
    pub name:        Option<String>,
    #[serde(default)]
    pub field:       Vec<FieldDescriptor>,
    #[serde(default)]
    pub nested_type: Vec<Descriptor>,
    #[serde(default)]
    pub oneof_decl:  Vec<OneofDescriptor>,
    #[serde(default)]
    pub options:     Option<Options>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneofDescriptor {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub name:        Option<String>,
    #[serde(default)]
    pub number:      Option<i32>,
    #[serde(default)]
    pub label:       Label,
    #[serde(default, rename = "type")]
    pub type_:       Option<FieldType>,
    /// Fully-qualified name of a message or enum type, with a leading dot.
    #[serde(default)]
    pub type_name:   Option<String>,
    #[serde(default)]
    pub oneof_index: Option<i32>,
    #[serde(default)]
    pub options:     Option<Options>,
}

impl FieldDescriptor {
    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }

    /// True for message-typed fields that reference a named type.
    pub fn is_message(&self) -> bool {
        matches!(self.type_, Some(FieldType::Message)) && self.type_name.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    #[default]
    #[serde(rename = "LABEL_OPTIONAL")]
    Optional,
    #[serde(rename = "LABEL_REQUIRED")]
    Required,
    #[serde(rename = "LABEL_REPEATED")]
    Repeated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "TYPE_DOUBLE")]
    Double,
    #[serde(rename = "TYPE_FLOAT")]
    Float,
    #[serde(rename = "TYPE_INT64")]
    Int64,
    #[serde(rename = "TYPE_UINT64")]
    Uint64,
    #[serde(rename = "TYPE_INT32")]
    Int32,
    #[serde(rename = "TYPE_FIXED64")]
    Fixed64,
    #[serde(rename = "TYPE_FIXED32")]
    Fixed32,
    #[serde(rename = "TYPE_BOOL")]
    Bool,
    #[serde(rename = "TYPE_STRING")]
    String,
    #[serde(rename = "TYPE_GROUP")]
    Group,
    #[serde(rename = "TYPE_MESSAGE")]
    Message,
    #[serde(rename = "TYPE_BYTES")]
    Bytes,
    #[serde(rename = "TYPE_UINT32")]
    Uint32,
    #[serde(rename = "TYPE_ENUM")]
    Enum,
    #[serde(rename = "TYPE_SFIXED32")]
    Sfixed32,
    #[serde(rename = "TYPE_SFIXED64")]
    Sfixed64,
    #[serde(rename = "TYPE_SINT32")]
    Sint32,
    #[serde(rename = "TYPE_SINT64")]
    Sint64,
}
