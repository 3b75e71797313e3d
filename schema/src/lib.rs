//! Input models for the struct-transformer generator.
//!
//! The wire side is described with protobuf descriptor shaped types
//! ([`Request`], [`FileDescriptor`], [`Descriptor`], [`FieldDescriptor`]) that
//! deserialize from the JSON form of a `CodeGeneratorRequest`:
//!
//! ```
//! use struct_transformer_schema::*;
//!
//! let request: Request = serde_json::from_str(r#"{
//!     "proto_file": [{
//!         "name": "customer.proto",
//!         "package": "svc",
//!         "message_type": [{
//!             "name": "Customer",
//!             "field": [{"name": "id", "type": "TYPE_INT64"}],
//!             "options": {"transformer.go_struct": "Customer"}
//!         }]
//!     }]
//! }"#).unwrap();
//!
//! let field = &request.proto_file[0].message_type[0].field[0];
//! assert_eq!(field.type_, Some(FieldType::Int64));
//! assert!(!field.is_repeated());
//! ```
//!
//! The destination side is a [`StructureList`]: structure name to field name
//! to [`FieldInfo`].

pub mod structure;
pub mod wire;

pub use structure::*;
pub use wire::*;
