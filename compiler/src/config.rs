use serde::{Deserialize, Serialize};

use crate::{error::TransformerError, naming::DEFAULT_ABBREVIATIONS};

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Go package name of the generated files.
    pub package_name:        String,
    /// Package alias used as a prefix for helper calls that need one.
    pub helper_package:      Option<String>,
    /// Add descriptive comments for every field and target structure.
    pub debug:               bool,
    /// Place generated files under a directory named after `package_name`.
    pub use_package_in_path: bool,
    /// Default version marker passed to oneof write helpers.
    pub version:             String,
    /// Version marker that forces the string variant on oneof writes.
    pub legacy_version:      String,
    /// Reserved abbreviation tokens, e.g. `Id` => `ID`.
    pub abbreviations:       Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            package_name:        "fallback".to_string(),
            helper_package:      None,
            debug:               false,
            use_package_in_path: true,
            version:             "v1".to_string(),
            legacy_version:      "v2".to_string(),
            abbreviations:       DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Applies a protoc parameter string such as `package=transform,debug=true`.
    ///
    /// Entries without `=` (output directories) and `M` import mappings are ignored.
    pub fn apply_parameters(&mut self, parameter: &str) -> Result<(), TransformerError> {
        for entry in parameter.split(',') {
            let mut spec = entry.splitn(2, '=');
            let key = spec.next().unwrap_or_default().trim();
            let value = match spec.next() {
                Some(v) => v.trim(),
                None => continue,
            };
            if key.starts_with('M') {
                continue;
            }
            self.set(key, value)?;
        }
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TransformerError> {
        match key {
            "package" => self.package_name = value.to_string(),
            "helper-package" => {
                self.helper_package = Some(value.to_string()).filter(|v| !v.is_empty())
            }
            "debug" => self.debug = parse_bool(key, value)?,
            "use-package-in-path" => self.use_package_in_path = parse_bool(key, value)?,
            "version" => self.version = value.to_string(),
            "legacy-version" => self.legacy_version = value.to_string(),
            "abbreviations" => {
                self.abbreviations = value
                    .split('|')
                    .filter(|a| !a.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            // import fixing is done by an external formatter
            "goimports" => {
                parse_bool(key, value)?;
            }
            _ => {
                return Err(TransformerError::InvalidParameter(format!(
                    "unknown parameter {:?}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, TransformerError> {
    match value {
        "true" | "1" | "t" | "T" | "TRUE" | "True" => Ok(true),
        "false" | "0" | "f" | "F" | "FALSE" | "False" => Ok(false),
        _ => Err(TransformerError::InvalidParameter(format!(
            "invalid boolean value {:?} for {:?}",
            value, key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.package_name, "fallback");
        assert_eq!(config.version, "v1");
        assert_eq!(config.legacy_version, "v2");
        assert_eq!(config.abbreviations, vec!["Id", "Sku", "Url"]);
        assert!(config.use_package_in_path);
        assert!(!config.debug);
    }

    #[test]
    fn test_apply_parameters() {
        let mut config = Config::default();
        config
            .apply_parameters("out/dir,Mfoo.proto=github.com/x/foo,package=transform,debug=true,helper-package=helpers")
            .unwrap();
        assert_eq!(config.package_name, "transform");
        assert_eq!(config.helper_package.as_deref(), Some("helpers"));
        assert!(config.debug);
    }

    #[test]
    fn test_apply_parameters_abbreviations() {
        let mut config = Config::default();
        config.apply_parameters("abbreviations=Id|Uuid").unwrap();
        assert_eq!(config.abbreviations, vec!["Id", "Uuid"]);
    }

    #[test]
    fn test_apply_parameters_errors() {
        let mut config = Config::default();
        let err = config.apply_parameters("unknown=1").unwrap_err();
        assert!(matches!(err, TransformerError::InvalidParameter(_)));

        let err = config.apply_parameters("debug=maybe").unwrap_err();
        assert!(matches!(err, TransformerError::InvalidParameter(_)));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"package_name": "transform"}"#).unwrap();
        assert_eq!(config.package_name, "transform");
        assert_eq!(config.version, "v1");
    }
}
