//! DynamoDB attribute-value JSON encoding
//!
//! Records are first serialized with serde, then every field is wrapped in
//! its attribute-value type tag:
//!
//! | JSON      | attribute value          |
//! |-----------|--------------------------|
//! | string    | `{"S": "..."}`           |
//! | number    | `{"N": "<decimal text>"}`|
//! | boolean   | `{"BOOL": true}`         |
//! | array     | `{"L": [...]}`           |
//! | object    | `{"M": {...}}`           |
//! | null      | field removed            |

use serde::Serialize;
use serde_json::{Map, Number, Value, json};

use crate::{Error, Result};

/// Largest magnitude below which integral floats are written without a
/// fractional part (2^53, the exact integer range of an f64)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Marshal a serializable record into an attribute-value map
pub fn marshal_record<T: Serialize>(record: &T) -> Result<Value> {
    let value = serde_json::to_value(record)
        .map_err(|e| Error::serialization("Failed to serialize record", e))?;

    match value {
        Value::Object(fields) => Ok(Value::Object(marshal_fields(fields))),
        other => Err(Error::serialization(
            "Failed to marshal record",
            serde::ser::Error::custom(format!("expected a JSON object, got {}", other)),
        )),
    }
}

/// Attribute-value form of a single JSON value, `None` for null
pub fn to_attribute_value(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(json!({ "BOOL": flag })),
        Value::Number(number) => Some(json!({ "N": number_text(&number) })),
        Value::String(text) => Some(json!({ "S": text })),
        Value::Array(items) => Some(json!({
            "L": items.into_iter().filter_map(to_attribute_value).collect::<Vec<_>>()
        })),
        Value::Object(fields) => Some(json!({ "M": marshal_fields(fields) })),
    }
}

fn marshal_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter_map(|(name, value)| to_attribute_value(value).map(|value| (name, value)))
        .collect()
}

/// Decimal text of a number; integral floats such as `50.0` become `50`
pub fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float)
            if !number.is_i64()
                && !number.is_u64()
                && float.fract() == 0.0
                && float.abs() < MAX_EXACT_INTEGER =>
        {
            format!("{}", float as i64)
        }
        _ => number.to_string(),
    }
}
