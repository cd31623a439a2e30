//! Delegated calls to the upstream inference service.
//!
//! One HTTP call per invocation, no retries. Anything other than a 200 comes
//! back as a gateway error; the upstream status and body only go to the
//! diagnostic log.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Serialize;

use crate::error::{Result, ShimError};
use crate::logging::{LogLevel, SharedLogger};

const LOG_BODY_LIMIT: usize = 2000;

#[derive(Clone)]
pub struct UpstreamGateway {
    client: reqwest::Client,
    base_url: String,
    logger: SharedLogger,
}

impl UpstreamGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, logger: SharedLogger) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            logger,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Issue a single call and return the body of a 200 response.
    pub async fn call(&self, path: &str, method: Method, body: Option<Vec<u8>>) -> Result<Bytes> {
        let url = self.url(path);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        self.logger.debug("gateway", format!("{method} {url}"));

        let response = request.send().await.map_err(|e| {
            self.logger
                .error("gateway", format!("{method} {url} failed: {e}"));
            ShimError::gateway(format!("request to {url} failed: {e}"), None)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            self.logger.error(
                "gateway",
                format!("Failed to read body of {method} {url} (status={status}): {e}"),
            );
            ShimError::gateway(format!("failed to read upstream body: {e}"), Some(status))
        })?;

        let level = if status == 200 {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        };
        self.logger.log_with_context(
            level,
            "gateway",
            format!("Upstream response status={} body_len={}", status, body.len()),
            serde_json::json!({
                "method": method.as_str(),
                "url": url,
                "status": status,
                "body": truncate(&String::from_utf8_lossy(&body), LOG_BODY_LIMIT),
            }),
        );

        if status != 200 {
            return Err(ShimError::gateway("upstream error", Some(status)));
        }

        Ok(body)
    }

    pub async fn get(&self, path: &str) -> Result<Bytes> {
        self.call(path, Method::GET, None).await
    }

    pub async fn post_json<T: Serialize>(&self, path: &str, payload: &T) -> Result<Bytes> {
        let body = serde_json::to_vec(payload)?;
        self.call(path, Method::POST, Some(body)).await
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
