//! API translation between the `OpenAI` and Llama Stack formats.
//!
//! The core of the shim: validates client requests, converts requests and
//! responses between the two API shapes, and maps model listings. All
//! translation functions are pure (no I/O).

pub mod llama_types;
pub mod models;
pub mod openai_types;
pub mod request;
pub mod response;
pub mod validate;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Whether a JSON value counts as "not supplied" for defaulting purposes:
/// `null`, `false`, `0`, or the empty string.
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Field deserializer that keeps an explicit `null` as `Some(Value::Null)`.
/// Pair with `#[serde(default)]` so only a missing field becomes `None`.
pub(crate) fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
