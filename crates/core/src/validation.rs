//! Request payload handling.
//!
//! Case payloads are accepted leniently: anything that is not a JSON object is treated as an
//! empty object, and field values of any JSON type are coerced to text.

use serde_json::{Map, Value};

/// A decoded request body.
pub type Payload = Map<String, Value>;

/// Decodes a request body into a [`Payload`].
///
/// An empty body, malformed JSON or a non-object JSON value all yield an empty payload.
pub fn payload_from_slice(bytes: &[u8]) -> Payload {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        _ => Payload::new(),
    }
}

/// Converts a JSON value to text.
///
/// Strings are taken verbatim; every other value uses its compact JSON rendering, so `null`
/// is stored as the text `"null"` and `true` as `"true"`.
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
