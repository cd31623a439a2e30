//! Translate a validated `OpenAI` chat request into the Llama Stack payload.
//!
//! Sampling fields the client left out are filled from [`SamplingDefaults`].
//! A field that is present but falsy (`0`, `""`, `false`, `null`) counts as
//! left out, so `temperature: 0` is sent upstream as the default temperature.
//! Any other value is forwarded exactly as the client sent it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::is_falsy;
use super::llama_types::ChatCompletionPayload;
use super::openai_types::ChatCompletionRequest;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingDefaults {
    pub max_tokens: i64,
    pub temperature: f64,
    pub top_k: i64,
    pub top_p: f64,
    pub repeat_penalty: f64,
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            max_tokens: 128,
            temperature: 0.7,
            top_k: 50,
            top_p: 0.9,
            repeat_penalty: 1.05,
        }
    }
}

/// Build the upstream payload. Model and messages pass through unchanged.
#[must_use]
pub fn to_upstream_chat_payload(
    req: ChatCompletionRequest,
    defaults: &SamplingDefaults,
) -> ChatCompletionPayload {
    ChatCompletionPayload {
        model: req.model,
        messages: req.messages,
        stream: or_default(req.stream, false),
        max_tokens: or_default(req.max_tokens, defaults.max_tokens),
        temperature: or_default(req.temperature, defaults.temperature),
        top_k: or_default(req.top_k, defaults.top_k),
        top_p: or_default(req.top_p, defaults.top_p),
        repeat_penalty: or_default(req.repeat_penalty, defaults.repeat_penalty),
    }
}

fn or_default(value: Option<Value>, default: impl Into<Value>) -> Value {
    value
        .filter(|v| !is_falsy(v))
        .unwrap_or_else(|| default.into())
}
