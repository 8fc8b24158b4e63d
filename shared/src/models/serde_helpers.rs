//! Serde helpers for loosely typed form fields
//!
//! The web client posts numbers either as JSON numbers or as the raw text
//! of an input box (`"12000"`, `""`), and flags either as booleans or null.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
    /// Booleans, arrays and objects read as absent
    Other(IgnoredAny),
}

/// Deserialize an optional number that may arrive as a numeric string.
///
/// Empty or non-numeric text and `null` become `None`.
pub fn loose_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(match value {
        Some(LooseNumber::Number(n)) if n.is_finite() => Some(n),
        Some(LooseNumber::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

/// Deserialize bool that treats null (or a missing field) as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "loose_f64")]
        value: Option<f64>,
        #[serde(default, deserialize_with = "bool_false")]
        flag: bool,
    }

    fn parse(json: &str) -> Form {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_loose_f64_accepts_numbers_and_text() {
        assert_eq!(parse(r#"{"value": 4}"#).value, Some(4.0));
        assert_eq!(parse(r#"{"value": "12000"}"#).value, Some(12000.0));
        assert_eq!(parse(r#"{"value": " 3.5 "}"#).value, Some(3.5));
    }

    #[test]
    fn test_loose_f64_degrades_to_none() {
        assert_eq!(parse(r#"{"value": ""}"#).value, None);
        assert_eq!(parse(r#"{"value": "abc"}"#).value, None);
        assert_eq!(parse(r#"{"value": null}"#).value, None);
        assert_eq!(parse(r#"{"value": true}"#).value, None);
        assert_eq!(parse(r#"{"value": [4]}"#).value, None);
        assert_eq!(parse(r#"{"value": {"n": 4}}"#).value, None);
        assert_eq!(parse("{}").value, None);
    }

    #[test]
    fn test_bool_false_defaults() {
        assert!(!parse(r#"{"flag": null}"#).flag);
        assert!(!parse("{}").flag);
        assert!(parse(r#"{"flag": true}"#).flag);
    }
}
