//! Typed access to descriptor option maps.
//!
//! An absent option map or an absent key means "use the default". A key that
//! is present with the wrong JSON type is a `MalformedOption` error.

use serde_json::Value;
use struct_transformer_schema::Options;

use crate::error::TransformerError;

pub const GO_STRUCT:            &str = "transformer.go_struct";
pub const GO_MODELS_FILE_PATH:  &str = "transformer.go_models_file_path";
pub const MAP_TO:               &str = "transformer.map_to";
pub const MAP_AS:               &str = "transformer.map_as";
pub const SKIP:                 &str = "transformer.skip";
pub const EMBED:                &str = "transformer.embed";
pub const NULLABLE:             &str = "gogoproto.nullable";
pub const GO_PACKAGE:           &str = "go_package";

pub fn string_option(
    options: Option<&Options>,
    name: &str,
) -> Result<Option<String>, TransformerError> {
    match options.and_then(|o| o.get(name)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(TransformerError::MalformedOption {
            option:   name.to_string(),
            expected: "string",
        }),
    }
}

pub fn bool_option(
    options: Option<&Options>,
    name: &str,
) -> Result<Option<bool>, TransformerError> {
    match options.and_then(|o| o.get(name)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(TransformerError::MalformedOption {
            option:   name.to_string(),
            expected: "bool",
        }),
    }
}

/// Per-field options after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    pub skip:     bool,
    pub map_to:   Option<String>,
    pub map_as:   Option<String>,
    pub embed:    bool,
    pub nullable: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        FieldOptions {
            skip:     false,
            map_to:   None,
            map_as:   None,
            embed:    false,
            nullable: true,
        }
    }
}

impl FieldOptions {
    pub fn extract(options: Option<&Options>) -> Result<Self, TransformerError> {
        Ok(FieldOptions {
            skip:     bool_option(options, SKIP)?.unwrap_or(false),
            map_to:   string_option(options, MAP_TO)?,
            map_as:   string_option(options, MAP_AS)?,
            embed:    bool_option(options, EMBED)?.unwrap_or(false),
            nullable: bool_option(options, NULLABLE)?.unwrap_or(true),
        })
    }
}

/// Package alias from a `go_package` value: `github.com/x/pb;v1pb` => `v1pb`,
/// `github.com/x/pb` => `pb`.
pub fn go_package_alias(go_package: &str) -> String {
    match go_package.split_once(';') {
        Some((_, alias)) => alias.to_string(),
        None => go_package.rsplit('/').next().unwrap_or(go_package).to_string(),
    }
}

/// Import path part of a `go_package` value.
pub fn go_package_path(go_package: &str) -> &str {
    go_package.split(';').next().unwrap_or(go_package)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> Options {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_options_use_defaults() {
        assert_eq!(FieldOptions::extract(None).unwrap(), FieldOptions::default());
        let empty = options(json!({}));
        assert_eq!(FieldOptions::extract(Some(&empty)).unwrap(), FieldOptions::default());
    }

    #[test]
    fn test_extract_field_options() {
        let opts = options(json!({
            "transformer.skip": false,
            "transformer.map_to": "SecondID",
            "transformer.embed": true,
            "gogoproto.nullable": false
        }));
        let got = FieldOptions::extract(Some(&opts)).unwrap();
        assert_eq!(got.map_to.as_deref(), Some("SecondID"));
        assert_eq!(got.map_as, None);
        assert!(got.embed);
        assert!(!got.nullable);
    }

    #[test]
    fn test_malformed_option() {
        let opts = options(json!({"transformer.map_to": 12}));
        let err = FieldOptions::extract(Some(&opts)).unwrap_err();
        assert!(matches!(
            err,
            TransformerError::MalformedOption { ref option, expected: "string" } if option == MAP_TO
        ));

        let opts = options(json!({"transformer.skip": "yes"}));
        assert!(FieldOptions::extract(Some(&opts)).is_err());
    }

    #[test]
    fn test_go_package() {
        assert_eq!(go_package_alias("github.com/acme/api/pb;v1pb"), "v1pb");
        assert_eq!(go_package_alias("github.com/acme/api/pb"), "pb");
        assert_eq!(go_package_path("github.com/acme/api/pb;v1pb"), "github.com/acme/api/pb");
    }
}
