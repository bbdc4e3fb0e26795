//! Best-effort parsing of user text into typed values.
//!
//! Cell editors hand back plain strings; [`smartcast`] turns them into the
//! most specific [`ConfigValue`] the text can represent. The rules are fixed
//! and tried in order: null literals, boolean literals, integer, float, and
//! finally the text itself as a string. Parsing never fails.

use crate::tree::ConfigValue;

/// Parse `text` into the most specific scalar it can represent.
///
/// Recognized in order:
///
/// 1. `"None"`, `"none"`, `"null"` become [`ConfigValue::Null`]
/// 2. `"True"`/`"true"` and `"False"`/`"false"` become [`ConfigValue::Bool`]
/// 3. an `i64` literal becomes [`ConfigValue::Int`]
/// 4. an `f64` literal becomes [`ConfigValue::Float`]
/// 5. anything else is kept verbatim as [`ConfigValue::Str`]
///
/// Whitespace is not trimmed: `" 1"` is a string, not an integer, so text
/// the user typed deliberately survives untouched.
pub fn smartcast(text: &str) -> ConfigValue {
    match text {
        "None" | "none" | "null" => return ConfigValue::Null,
        "True" | "true" => return ConfigValue::Bool(true),
        "False" | "false" => return ConfigValue::Bool(false),
        _ => {}
    }
    if let Ok(i) = text.parse::<i64>() {
        return ConfigValue::Int(i);
    }
    if let Ok(f) = text.parse::<f64>() {
        // `parse::<f64>` accepts "inf"/"nan" spellings; keep those as text
        // since they have no round-trippable value representation.
        if f.is_finite() {
            return ConfigValue::Float(f);
        }
    }
    ConfigValue::Str(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_literals() {
        assert_eq!(smartcast("None"), ConfigValue::Null);
        assert_eq!(smartcast("none"), ConfigValue::Null);
        assert_eq!(smartcast("null"), ConfigValue::Null);
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(smartcast("True"), ConfigValue::Bool(true));
        assert_eq!(smartcast("true"), ConfigValue::Bool(true));
        assert_eq!(smartcast("False"), ConfigValue::Bool(false));
        assert_eq!(smartcast("false"), ConfigValue::Bool(false));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(smartcast("42"), ConfigValue::Int(42));
        assert_eq!(smartcast("-7"), ConfigValue::Int(-7));
        assert_eq!(smartcast("2.5"), ConfigValue::Float(2.5));
        assert_eq!(smartcast("-0.5"), ConfigValue::Float(-0.5));
        assert_eq!(smartcast("1e3"), ConfigValue::Float(1000.0));
    }

    #[test]
    fn test_strings() {
        assert_eq!(smartcast("abc"), ConfigValue::Str("abc".into()));
        assert_eq!(smartcast(""), ConfigValue::Str("".into()));
        assert_eq!(smartcast(" 1"), ConfigValue::Str(" 1".into()));
        assert_eq!(smartcast("TRUE"), ConfigValue::Str("TRUE".into()));
        assert_eq!(smartcast("nan"), ConfigValue::Str("nan".into()));
        assert_eq!(smartcast("inf"), ConfigValue::Str("inf".into()));
    }
}
