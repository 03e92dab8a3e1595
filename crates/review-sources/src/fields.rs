//! Lenient field access over loosely-typed JSON objects.

use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

/// Parse a line as a JSON object. Anything else is `None`.
pub fn parse_object(line: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// String value of `key`. Other scalars are rendered as text; null and
/// missing keys are `None`.
pub fn string(obj: &JsonObject, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn string_or(obj: &JsonObject, key: &str, default: &str) -> String {
    string(obj, key).unwrap_or_else(|| default.to_string())
}

/// Numeric value of `key`, accepting numeric strings.
pub fn float(obj: &JsonObject, key: &str) -> Option<f64> {
    as_float(obj.get(key)?)
}

/// Integer value of `key`. Fractional numbers are truncated.
pub fn integer(obj: &JsonObject, key: &str) -> Option<i64> {
    as_integer(obj.get(key)?)
}

/// First element of an array field, as an integer.
pub fn first_integer(obj: &JsonObject, key: &str) -> Option<i64> {
    obj.get(key)?.as_array()?.first().and_then(as_integer)
}

/// String entries of an array field; non-string entries are dropped.
pub fn string_list(obj: &JsonObject, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
