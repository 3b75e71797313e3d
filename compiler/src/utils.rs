use heck::ToUpperCamelCase;

use crate::error::TransformerError;

pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("{:?}", text))
}

pub fn error(msg: &str, line: usize, column: usize) -> TransformerError {
    TransformerError::ParseError {
        msg: msg.to_string(),
        line,
        column,
    }
}

/// Returns the last dot-separated segment of `s`.
pub fn last_name(s: &str) -> &str {
    s.rsplit('.').next().unwrap_or(s)
}

/// Converts a string to CamelCase with a leading capital.
///
/// Words are split by heck. Letters already uppercase in `s` stay uppercase,
/// so `ID` stays `ID`, and a letter following a digit starts a new word
/// (`int64value` => `Int64Value`).
pub fn to_camel(s: &str) -> String {
    let camel = s.trim().to_upper_camel_case();
    let letters: Vec<char> = s.chars().filter(|c| c.is_alphanumeric()).collect();
    if letters.len() != camel.chars().count() {
        return camel;
    }

    let mut out = String::with_capacity(camel.len());
    let mut after_digit = false;
    for (c, original) in camel.chars().zip(letters) {
        if original.is_uppercase() || after_digit {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        after_digit = c.is_ascii_digit();
    }
    out
}

/// Alias used in helper names for a declared Go type: `nulls.Time` => `NullsTime`.
pub fn type_alias(type_name: &str) -> String {
    to_camel(&type_name.replace('.', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel() {
        assert_eq!(to_camel("proto_field_name"), "ProtoFieldName");
        assert_eq!(to_camel("int64_field"), "Int64Field");
        assert_eq!(to_camel("int64value"), "Int64Value");
        assert_eq!(to_camel("ID"), "ID");
        assert_eq!(to_camel("id"), "Id");
        assert_eq!(to_camel("PkgTypeField"), "PkgTypeField");
        assert_eq!(to_camel("not_exists"), "NotExists");
        assert_eq!(to_camel(""), "");
    }

    #[test]
    fn test_to_camel_keeps_uppercase_runs() {
        assert_eq!(to_camel("OrderID"), "OrderID");
        assert_eq!(to_camel("SKU_code"), "SKUCode");
        assert_eq!(to_camel("Order_Line"), "OrderLine");
        assert_eq!(to_camel("nulls-time"), "NullsTime");
        assert_eq!(to_camel("sha256sum"), "Sha256Sum");
    }

    #[test]
    fn test_type_alias() {
        assert_eq!(type_alias("nulls.Time"), "NullsTime");
        assert_eq!(type_alias("pkg.Type"), "PkgType");
        assert_eq!(type_alias("int64"), "Int64");
        assert_eq!(type_alias("string"), "String");
    }

    #[test]
    fn test_last_name() {
        assert_eq!(last_name(".svc.example.Address"), "Address");
        assert_eq!(last_name("Address"), "Address");
        assert_eq!(last_name(""), "");
    }
}
