use crate::config::ShimConfig;
use crate::error::ShimError;
use crate::gateway::UpstreamGateway;
use crate::logging::SharedLogger;
use crate::proxy;
use crate::translate::openai_types::{ChatCompletionResponse, ModelList};

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: ShimConfig,
    pub gateway: UpstreamGateway,
    pub logger: SharedLogger,
}

impl AppState {
    pub fn new(config: ShimConfig, client: reqwest::Client, logger: SharedLogger) -> Self {
        let gateway = UpstreamGateway::new(client, config.upstream.base_url.clone(), logger.clone());
        Self {
            config,
            gateway,
            logger,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/models", get(handle_models))
        .route("/v1/chat/completions", post(handle_chat_completion))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelList>, ShimError> {
    proxy::list_models(&state.config, &state.gateway, &state.logger)
        .await
        .map(Json)
}

// The body is taken raw so that malformed JSON maps to our own 400 text
// instead of axum's extractor rejection.
async fn handle_chat_completion(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatCompletionResponse>, ShimError> {
    proxy::chat_completion(&body, &state.config, &state.gateway, &state.logger)
        .await
        .map(Json)
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
