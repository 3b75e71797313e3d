use std::collections::BTreeMap;
use std::fmt;

use struct_transformer_schema::{Descriptor, FileDescriptor, Request};

use crate::{error::TransformerError, options::{string_option, GO_STRUCT}};

/// What is known about a message that other messages use as a field type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubMessage {
    /// Destination structure name from the `go_struct` option, empty if absent.
    pub target:     String,
    /// Full name without the leading dot, e.g. `svc.example.Address`.
    pub full_name:  String,
    /// Go type generated for the message: the path inside its file joined
    /// with `_`, e.g. `Order_Line`.
    pub go_name:    String,
    /// Name of the first oneof declared in the message, empty if none.
    pub oneof_decl: String,
}

impl SubMessage {
    /// The message has no destination structure.
    pub fn omitted(&self) -> bool {
        self.target.is_empty()
    }
}

/// Read-only lookup of every message in a request by full name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    messages: BTreeMap<String, SubMessage>,
}

impl Registry {
    /// Walks every file and message of the request once.
    pub fn collect(request: &Request) -> Result<Self, TransformerError> {
        let mut registry = Registry::default();
        for file in &request.proto_file {
            registry.add_file(file)?;
        }
        Ok(registry)
    }

    pub fn add_file(&mut self, file: &FileDescriptor) -> Result<(), TransformerError> {
        let package = file.package.as_deref().unwrap_or_default();
        for msg in &file.message_type {
            self.add_message(package, &mut Vec::new(), msg)?;
        }
        Ok(())
    }

    fn add_message<'m>(
        &mut self,
        package: &str,
        path: &mut Vec<&'m str>,
        msg: &'m Descriptor,
    ) -> Result<(), TransformerError> {
        // reported when the message itself is processed
        let Some(name) = msg.name.as_deref() else {
            return Ok(());
        };
        path.push(name);
        let go_name = path.join("_");
        let full_name = if package.is_empty() {
            path.join(".")
        } else {
            format!("{}.{}", package, path.join("."))
        };

        let target = string_option(msg.options.as_ref(), GO_STRUCT)?.unwrap_or_default();
        let oneof_decl = msg
            .oneof_decl
            .first()
            .and_then(|o| o.name.clone())
            .unwrap_or_default();

        for nested in &msg.nested_type {
            self.add_message(package, path, nested)?;
        }
        path.pop();

        self.insert(SubMessage {
            target,
            full_name,
            go_name,
            oneof_decl,
        });
        Ok(())
    }

    pub fn insert(&mut self, sub: SubMessage) {
        self.messages.insert(sub.full_name.clone(), sub);
    }

    /// Looks up a message by type name, with or without the leading dot.
    pub fn get(&self, type_name: &str) -> Option<&SubMessage> {
        self.messages.get(type_name.trim_start_matches('.'))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, sub) in &self.messages {
            writeln!(
                f,
                "// {:?}: target: {:?}, Omitted: {}, OneofDecl: {:?}",
                name,
                sub.target,
                sub.omitted(),
                sub.oneof_decl
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> Request {
        serde_json::from_str(
            r#"{
            "proto_file": [{
                "name": "customer.proto",
                "package": "svc.example",
                "message_type": [
                    {
                        "name": "Customer",
                        "options": {"transformer.go_struct": "Customer"},
                        "nested_type": [
                            {"name": "Note", "options": {"transformer.go_struct": "CustomerNote"}}
                        ]
                    },
                    {
                        "name": "TheOne",
                        "oneof_decl": [{"name": "the_decl"}]
                    }
                ]
            }]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_collect() {
        let registry = Registry::collect(&request()).unwrap();
        assert_eq!(registry.len(), 3);

        let customer = registry.get(".svc.example.Customer").unwrap();
        assert_eq!(customer.target, "Customer");
        assert!(!customer.omitted());
        assert_eq!(customer.oneof_decl, "");

        let note = registry.get("svc.example.Customer.Note").unwrap();
        assert_eq!(note.target, "CustomerNote");
        assert_eq!(note.go_name, "Customer_Note");

        let one = registry.get(".svc.example.TheOne").unwrap();
        assert!(one.omitted());
        assert_eq!(one.oneof_decl, "the_decl");
        assert_eq!(one.go_name, "TheOne");
    }

    #[test]
    fn test_collect_skips_unnamed() {
        let request: Request =
            serde_json::from_str(r#"{"proto_file": [{"message_type": [{}, {"name": "A"}]}]}"#).unwrap();
        let registry = Registry::collect(&request).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("A").unwrap().omitted());
    }

    #[test]
    fn test_collect_malformed_target() {
        let request: Request = serde_json::from_str(
            r#"{"proto_file": [{"message_type": [{"name": "A", "options": {"transformer.go_struct": true}}]}]}"#,
        )
        .unwrap();
        let err = Registry::collect(&request).unwrap_err();
        assert!(matches!(err, TransformerError::MalformedOption { .. }));
    }
}
