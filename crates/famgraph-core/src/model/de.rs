//! Lenient field decoders for records coming out of the spreadsheet layer.
//!
//! Cells arrive as real JSON booleans/numbers or as their text renderings (`"TRUE"`, `"1"`,
//! `"Sí"`, `"42"`, `""`).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

const TRUTHY: &[&str] = &["TRUE", "1", "SÍ", "SI", "X"];

pub(crate) fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_bool(&Value::deserialize(deserializer)?).unwrap_or(false))
}

pub(crate) fn flexible_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_bool(&Value::deserialize(deserializer)?))
}

pub(crate) fn flexible_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

pub(crate) fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub(crate) fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(TRUTHY.contains(&s.trim().to_uppercase().as_str())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_cells_decode_like_checkboxes() {
        assert_eq!(value_as_bool(&json!("TRUE")), Some(true));
        assert_eq!(value_as_bool(&json!("sí")), Some(true));
        assert_eq!(value_as_bool(&json!("no")), Some(false));
        assert_eq!(value_as_bool(&json!("")), None);
        assert_eq!(value_as_bool(&json!(null)), None);
        assert_eq!(value_as_bool(&json!(1)), Some(true));
    }
}
