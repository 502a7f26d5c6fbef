//! Engine values to JSON.

use geoprompt_core::models::Row;
use serde_json::{Number, Value};

use crate::ports::{EngineRow, EngineValue};

fn float(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Deep-convert an engine value into plain JSON.
///
/// Wide integers become `i64` when they fit and `f64` otherwise; NaN and
/// infinities become null; blobs become lowercase hex.
pub fn normalize_value(value: EngineValue) -> Value {
    match value {
        EngineValue::Null => Value::Null,
        EngineValue::Boolean(b) => Value::Bool(b),
        EngineValue::Int(i) => Value::from(i),
        EngineValue::HugeInt(i) => match i64::try_from(i) {
            Ok(i) => Value::from(i),
            Err(_) => float(i as f64),
        },
        EngineValue::UInt(u) => match i64::try_from(u) {
            Ok(i) => Value::from(i),
            Err(_) => float(u as f64),
        },
        EngineValue::Float(f) => float(f),
        EngineValue::Text(s) => Value::String(s),
        EngineValue::Blob(bytes) => Value::String(hex(&bytes)),
        EngineValue::List(items) => Value::Array(items.into_iter().map(normalize_value).collect()),
        EngineValue::Struct(fields) => Value::Object(
            fields.into_iter().map(|(name, value)| (name, normalize_value(value))).collect(),
        ),
    }
}

/// Normalize a whole row, keeping column order
pub fn normalize_row(row: EngineRow) -> Row {
    row.into_iter().map(|(name, value)| (name, normalize_value(value))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wide_integers() {
        assert_eq!(normalize_value(EngineValue::HugeInt(42)), json!(42));
        assert_eq!(normalize_value(EngineValue::HugeInt(-7)), json!(-7));
        assert_eq!(normalize_value(EngineValue::UInt(u64::MAX)), json!(u64::MAX as f64));
        assert_eq!(normalize_value(EngineValue::HugeInt(i128::MAX)), json!(i128::MAX as f64));
    }

    #[test]
    fn test_non_finite_floats_become_null() {
        assert_eq!(normalize_value(EngineValue::Float(f64::NAN)), Value::Null);
        assert_eq!(normalize_value(EngineValue::Float(f64::INFINITY)), Value::Null);
        assert_eq!(normalize_value(EngineValue::Float(12.5)), json!(12.5));
    }

    #[test]
    fn test_blob_is_hex() {
        assert_eq!(normalize_value(EngineValue::Blob(vec![0x01, 0xab, 0xff])), json!("01abff"));
    }

    #[test]
    fn test_nested_values() {
        let value = EngineValue::Struct(vec![
            ("tags".to_string(), EngineValue::List(vec![EngineValue::HugeInt(1), EngineValue::Null])),
            ("score".to_string(), EngineValue::Float(f64::NAN)),
        ]);
        assert_eq!(normalize_value(value), json!({ "tags": [1, null], "score": null }));
    }

    #[test]
    fn test_row_keeps_column_order() {
        let row = vec![
            ("z".to_string(), EngineValue::Int(1)),
            ("a".to_string(), EngineValue::Text("x".into())),
            ("m".to_string(), EngineValue::Boolean(true)),
        ];
        let normalized = normalize_row(row);
        let keys: Vec<&str> = normalized.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
