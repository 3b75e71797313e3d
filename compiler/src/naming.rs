use crate::utils::to_camel;

pub const DEFAULT_ABBREVIATIONS: [&str; 3] = ["Id", "Sku", "Url"];

/// Names used on both sides for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub wire: String,
    pub dest: String,
}

/// Derives wire-facing and destination-facing field names.
///
/// Protobuf generated structures use names like `SomeId` while hand-written
/// models spell identifiers `SomeID`. Every reserved token found at the end of
/// a name is uppercased on the destination side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRule {
    abbreviations: Vec<String>,
}

impl Default for NamingRule {
    fn default() -> Self {
        NamingRule::new(DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()))
    }
}

impl NamingRule {
    pub fn new(abbreviations: impl IntoIterator<Item = String>) -> Self {
        NamingRule {
            abbreviations: abbreviations.into_iter().filter(|a| !a.is_empty()).collect(),
        }
    }

    /// Uppercases a reserved token that equals `name` or ends it.
    /// Exact matches are checked before suffix matches.
    pub fn abbreviation_upper(&self, name: &str) -> String {
        if let Some(a) = self.abbreviations.iter().find(|a| name == a.as_str()) {
            return a.to_uppercase();
        }

        for a in &self.abbreviations {
            if let Some(prefix) = name.strip_suffix(a.as_str()) {
                return format!("{}{}", prefix, a.to_uppercase());
            }
        }

        name.to_string()
    }

    /// Resolves both names of a field.
    ///
    /// `map_as` replaces the wire name and is used verbatim as the destination
    /// name. `map_to` replaces the destination name.
    pub fn resolve(&self, raw: &str, map_as: Option<&str>, map_to: Option<&str>) -> FieldNames {
        let (wire, dest) = match map_as.filter(|s| !s.is_empty()) {
            Some(explicit) => (explicit.to_string(), explicit.to_string()),
            None => {
                let wire = to_camel(raw);
                let dest = self.abbreviation_upper(&wire);
                (wire, dest)
            }
        };

        let dest = match map_to.filter(|s| !s.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => dest,
        };

        FieldNames { wire, dest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_upper() {
        let rule = NamingRule::default();
        let cases = [
            ("Id", "ID"),
            ("Url", "URL"),
            ("Sku", "SKU"),
            ("NewId", "NewID"),
            ("ProdUrl", "ProdURL"),
            ("SomeSku", "SomeSKU"),
            ("NonAbbr", "NonAbbr"),
            ("Valid", "Valid"),
        ];
        for (input, expected) in cases {
            assert_eq!(rule.abbreviation_upper(input), expected, "input {}", input);
        }
    }

    #[test]
    fn test_abbreviation_upper_is_idempotent() {
        let rule = NamingRule::default();
        for name in ["Id", "NewId", "ProdUrl", "SomeSku", "Name", "CustomerId"] {
            let once = rule.abbreviation_upper(name);
            assert_eq!(rule.abbreviation_upper(&once), once);
        }
    }

    #[test]
    fn test_custom_abbreviations() {
        let rule = NamingRule::new(vec!["Uuid".to_string()]);
        assert_eq!(rule.abbreviation_upper("OrderUuid"), "OrderUUID");
        assert_eq!(rule.abbreviation_upper("OrderId"), "OrderId");
    }

    #[test]
    fn test_resolve_names() {
        let rule = NamingRule::default();
        let cases = [
            ("proto_field_name", None, None, "ProtoFieldName", "ProtoFieldName"),
            ("proto_field_name", Some("map_as"), None, "map_as", "map_as"),
            ("proto_field_name", None, Some("map_to"), "ProtoFieldName", "map_to"),
            ("proto_field_name", Some("map_as"), Some("map_to"), "map_as", "map_to"),
            ("id", None, None, "Id", "ID"),
            ("second_id", None, None, "SecondId", "SecondID"),
            ("ID", None, None, "ID", "ID"),
            ("customer_id", Some("CustomerId"), None, "CustomerId", "CustomerId"),
        ];
        for (raw, map_as, map_to, wire, dest) in cases {
            let names = rule.resolve(raw, map_as, map_to);
            assert_eq!(names.wire, wire, "wire name of {}", raw);
            assert_eq!(names.dest, dest, "dest name of {}", raw);
        }
    }
}
