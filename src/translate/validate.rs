//! Structural checks on incoming chat requests.
//!
//! Validation runs on the raw JSON so the error text can name exactly what the
//! client sent. It also normalizes assistant messages in place: an assistant
//! turn without a `stop_reason` is marked `end_of_turn` before it is forwarded.

use serde_json::Value;

use super::is_falsy;
use super::openai_types::{ChatCompletionRequest, Role};
use crate::error::{Result, ShimError};

pub const DEFAULT_ASSISTANT_STOP_REASON: &str = "end_of_turn";

/// Parse a client body into JSON. Failure here is a client parse error.
pub fn parse_body(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| ShimError::client_parse(e.to_string()))
}

/// Check `messages` and every message role, stopping at the first violation.
pub fn validate_chat_request(request: &mut Value) -> Result<()> {
    let messages = match request.get_mut("messages") {
        Some(Value::Array(messages)) => messages,
        _ => return Err(ShimError::validation("'messages' must be an array.")),
    };

    for message in messages.iter_mut() {
        // A null entry has no fields at all; it is rejected like an unparseable body.
        if message.is_null() {
            return Err(ShimError::client_parse("null entry in 'messages'"));
        }

        let role = message.get("role");
        let role_name = role.and_then(Value::as_str);
        if !role_name.is_some_and(|r| Role::ALL.contains(&r)) {
            return Err(ShimError::validation(format!(
                "Invalid role '{}' in messages.",
                describe_role(role)
            )));
        }

        let is_assistant = role_name == Some("assistant");
        if is_assistant {
            if let Value::Object(fields) = message {
                let missing = fields.get("stop_reason").map_or(true, is_falsy);
                if missing {
                    fields.insert(
                        "stop_reason".to_string(),
                        Value::String(DEFAULT_ASSISTANT_STOP_REASON.to_string()),
                    );
                }
            }
        }
    }

    Ok(())
}

/// Convert a validated body into the typed request.
pub fn into_chat_request(request: Value) -> Result<ChatCompletionRequest> {
    serde_json::from_value(request)
        .map_err(|e| ShimError::validation(format!("Invalid request body: {e}")))
}

fn describe_role(role: Option<&Value>) -> String {
    match role {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
