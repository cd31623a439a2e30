use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::is_falsy;
use super::llama_types::LlamaChatResponse;
use super::openai_types::{ChatCompletionResponse, Choice, ChoiceMessage};
use crate::error::{Result, ShimError};

pub const DEFAULT_FINISH_REASON: &str = "stop";

/// Translate a Llama Stack chat response into an `OpenAI` chat completion.
/// `requested_model` is what the client asked for; the upstream does not echo it.
pub fn to_client_chat_response(
    resp: LlamaChatResponse,
    requested_model: Option<&Value>,
) -> Result<ChatCompletionResponse> {
    let message = resp
        .completion_message
        .ok_or_else(|| ShimError::mapping("missing completion_message"))?;

    let finish_reason = message
        .stop_reason
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_FINISH_REASON.to_string());

    let usage = resp
        .usage
        .filter(|u| !is_falsy(u))
        .unwrap_or_else(|| Value::Object(Map::new()));

    Ok(ChatCompletionResponse {
        id: completion_id(),
        object: "chat.completion".to_string(),
        created: Utc::now().timestamp(),
        model: requested_model.cloned(),
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: message.role,
                content: message.content,
            },
            finish_reason,
        }],
        usage,
    })
}

fn completion_id() -> String {
    format!("chatcmpl-{}", Uuid::new_v4().simple())
}
