//! Textual JSON input.
//!
//! JSON documents are parsed with `serde_json` (key order preserved) and
//! converted into the same [`Value`] tree the binary decoder produces, so one
//! renderer serves both.

use bjdata::{Object, Value};

/// True when `data` opens like a JSON document rather than a BJData container.
///
/// BJData containers are followed by a type marker (`U`, `$`, `#`, ...),
/// JSON containers by whitespace, a string, a number or another container.
pub fn looks_like_json(data: &[u8]) -> bool {
    match data {
        [b'{' | b'[', second, ..] => matches!(
            second,
            b' ' | b'\t' | b'\n' | b'\r' | b'"' | b'0'..=b'9' | b'-' | b'[' | b'{'
        ),
        _ => false,
    }
}

/// Parses `data` as JSON.
pub fn parse(data: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice::<serde_json::Value>(data).map(to_value)
}

/// Converts a parsed JSON document into a [`Value`].
pub fn to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(to_value).collect()),
        serde_json::Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, to_value(v)))
                .collect::<Object>(),
        ),
    }
}
