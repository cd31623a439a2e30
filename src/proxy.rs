use crate::config::ShimConfig;
use crate::error::{Result, ShimError};
use crate::gateway::UpstreamGateway;
use crate::logging::{LogLevel, SharedLogger};
use crate::translate::llama_types::{LlamaChatResponse, LlamaModel};
use crate::translate::models::to_client_model_list;
use crate::translate::openai_types::{ChatCompletionResponse, ModelList};
use crate::translate::request::to_upstream_chat_payload;
use crate::translate::response::to_client_chat_response;
use crate::translate::validate::{into_chat_request, parse_body, validate_chat_request};

use serde_json::{json, Value};

/// Fetch the upstream model registry and present it as an `OpenAI` model list.
pub async fn list_models(
    config: &ShimConfig,
    gateway: &UpstreamGateway,
    logger: &SharedLogger,
) -> Result<ModelList> {
    let body = gateway.get(&config.upstream.models_path).await?;

    let upstream: Vec<LlamaModel> = serde_json::from_slice(&body).map_err(|e| {
        logger.error("models", format!("Transformation failed: {e}"));
        ShimError::upstream_parse(e.to_string())
    })?;

    let list = to_client_model_list(&upstream).map_err(|e| {
        logger.error("models", format!("Transformation failed: {e}"));
        e
    })?;

    logger.info("models", format!("Listed {} models", list.data.len()));
    Ok(list)
}

/// Validate a raw client chat body, forward it upstream and translate the reply.
pub async fn chat_completion(
    body: &[u8],
    config: &ShimConfig,
    gateway: &UpstreamGateway,
    logger: &SharedLogger,
) -> Result<ChatCompletionResponse> {
    let mut raw = parse_body(body).map_err(|e| {
        logger.error("chat", format!("Failed to parse request body: {e}"));
        e
    })?;

    logger.log_with_context(LogLevel::Debug, "chat", "Received request body", raw.clone());

    if let Err(e) = validate_chat_request(&mut raw) {
        logger.log_with_context(
            LogLevel::Warn,
            "chat",
            format!("Rejected request: {e}"),
            raw,
        );
        return Err(e);
    }

    let req = into_chat_request(raw).map_err(|e| {
        logger.warn("chat", format!("Rejected request: {e}"));
        e
    })?;

    let payload = to_upstream_chat_payload(req, &config.defaults);

    logger.log_with_context(
        LogLevel::Debug,
        "chat",
        format!(
            "Upstream payload: model={} messages={}",
            model_label(payload.model.as_ref()),
            payload.messages.len()
        ),
        serde_json::to_value(&payload).unwrap_or_default(),
    );

    let reply = gateway
        .post_json(&config.upstream.chat_path, &payload)
        .await?;

    let upstream: LlamaChatResponse = serde_json::from_slice(&reply).map_err(|e| {
        logger.error("chat", format!("Transformation failed: {e}"));
        ShimError::upstream_parse(e.to_string())
    })?;

    let response = to_client_chat_response(upstream, payload.model.as_ref()).map_err(|e| {
        logger.log_with_context(
            LogLevel::Error,
            "chat",
            format!("Transformation failed: {e}"),
            json!({ "upstream_body": String::from_utf8_lossy(&reply) }),
        );
        e
    })?;

    logger.info(
        "chat",
        format!(
            "Completed: id={} model={} finish_reason={}",
            response.id,
            model_label(response.model.as_ref()),
            response
                .choices
                .first()
                .map_or("", |c| c.finish_reason.as_str())
        ),
    );

    Ok(response)
}

fn model_label(model: Option<&Value>) -> String {
    match model {
        None => "-".to_string(),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    }
}
