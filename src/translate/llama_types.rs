//! Type definitions for the upstream Llama Stack inference API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::openai_types::ChatMessage;
use super::present;

/// A model record as the upstream lists it. Extra fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlamaModel {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
}

/// The normalized request actually sent upstream. Every sampling field is set;
/// client values are forwarded as the client wrote them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionPayload {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    pub messages: Vec<ChatMessage>,
    pub stream: Value,
    pub max_tokens: Value,
    pub temperature: Value,
    pub top_k: Value,
    pub top_p: Value,
    pub repeat_penalty: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlamaChatResponse {
    #[serde(default)]
    pub completion_message: Option<CompletionMessage>,
    #[serde(default)]
    pub usage: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Value>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}
