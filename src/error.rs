//! Error types for the shim and their mapping onto client responses.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub const INVALID_JSON_BODY: &str = "Bad Request: Invalid JSON in request body";
pub const TRANSFORMATION_FAILURE: &str = "Internal Server Error: Transformation failure";
pub const UPSTREAM_FAILURE: &str = "Bad Gateway: Upstream service error";

/// Which side of the shim produced a body that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Client,
    Upstream,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Client => f.write_str("client"),
            Origin::Upstream => f.write_str("upstream"),
        }
    }
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShimError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse {origin} body: {message}")]
    Parse { origin: Origin, message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Gateway error: {message}")]
    Gateway { message: String, status: Option<u16> },

    #[error("Mapping error: {message}")]
    Mapping { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ShimError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn client_parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            origin: Origin::Client,
            message: msg.into(),
        }
    }

    pub fn upstream_parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            origin: Origin::Upstream,
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn gateway(msg: impl Into<String>, status: Option<u16>) -> Self {
        Self::Gateway {
            message: msg.into(),
            status,
        }
    }

    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::Mapping {
            message: msg.into(),
        }
    }

    /// Status code the client sees for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShimError::Parse {
                origin: Origin::Client,
                ..
            }
            | ShimError::Validation { .. } => StatusCode::BAD_REQUEST,
            ShimError::Gateway { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ShimError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ShimError::Validation { message } => {
                (status, Json(serde_json::json!({ "error": message }))).into_response()
            }
            ShimError::Parse {
                origin: Origin::Client,
                ..
            } => (status, INVALID_JSON_BODY).into_response(),
            // Upstream status and body stay in the diagnostic log.
            ShimError::Gateway { .. } => (status, UPSTREAM_FAILURE).into_response(),
            _ => (status, TRANSFORMATION_FAILURE).into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShimError>;
