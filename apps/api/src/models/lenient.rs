//! Lenient serde field decoders.
//!
//! Callers hand us records assembled by UI code and storage glue, so a field
//! can be missing, `null`, or simply the wrong JSON type. None of that is an
//! error here: each decoder maps anything unexpected to a conservative
//! default. Use together with `#[serde(default)]` so absent fields also work.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A sequence of strings. Non-arrays become empty; non-string items are dropped.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// A string. Numbers are stringified; anything else becomes `""`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// An optional string. Blank strings count as absent.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// A finite number. Numeric strings are parsed; everything else is `0.0`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value).unwrap_or(0.0))
}

/// An optional finite number.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

/// A boolean. Accepts `"true"`/`"false"` strings; anything else is `false`.
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Any optional value. A value that fails to decode as `T` is treated as absent.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "strings")]
        items: Vec<String>,
        #[serde(default, deserialize_with = "number")]
        amount: f64,
        #[serde(default, deserialize_with = "optional_string")]
        label: Option<String>,
        #[serde(default, deserialize_with = "boolean")]
        flag: bool,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_non_array_coerces_to_empty() {
        assert!(probe(json!({ "items": "Unity" })).items.is_empty());
        assert!(probe(json!({ "items": 42 })).items.is_empty());
        assert!(probe(json!({ "items": null })).items.is_empty());
    }

    #[test]
    fn test_non_string_items_are_dropped() {
        let p = probe(json!({ "items": ["Unity", 3, null, "C#"] }));
        assert_eq!(p.items, vec!["Unity", "C#"]);
    }

    #[test]
    fn test_numeric_strings_parse() {
        assert_eq!(probe(json!({ "amount": "4.5" })).amount, 4.5);
        assert_eq!(probe(json!({ "amount": "many" })).amount, 0.0);
        assert_eq!(probe(json!({ "amount": [] })).amount, 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let p = probe(json!({}));
        assert!(p.items.is_empty());
        assert_eq!(p.amount, 0.0);
        assert!(p.label.is_none());
        assert!(!p.flag);
    }

    #[test]
    fn test_blank_optional_string_is_none() {
        assert!(probe(json!({ "label": "   " })).label.is_none());
        assert_eq!(probe(json!({ "label": "Berlin" })).label.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_boolean_accepts_strings() {
        assert!(probe(json!({ "flag": "TRUE" })).flag);
        assert!(!probe(json!({ "flag": 1 })).flag);
    }
}
