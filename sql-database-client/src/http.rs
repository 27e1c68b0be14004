//! reqwest-backed transport.

use std::time::Instant;

use async_trait::async_trait;
use common::config::ClientConfig;
use common::errors::{AppError, AppResult};
use common::request_id::{RequestId, REQUEST_ID_HEADER};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::request::Method;
use crate::transport::AdminTransport;

/// Talks to the admin API over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with its own connection pool.
    pub fn new(config: ClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(config, http_client))
    }

    /// Creates a transport on top of an existing reqwest client.
    pub fn with_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Self { config, http_client }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> AppResult<Value> {
        let url = self.config.endpoint(path);
        let request_id = RequestId::new();

        let mut request = self
            .http_client
            .request(method.into(), &url)
            .header(REQUEST_ID_HEADER, request_id.as_str());
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        debug!(%method, %url, %request_id, "sending admin request");
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            warn!(%method, %url, %request_id, error = %e, "admin request failed");
            AppError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(AppError::from)?;
        debug!(
            %method,
            %url,
            %request_id,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "admin response received"
        );

        if !status.is_success() {
            let message = error_message(status, &text);
            warn!(%method, %url, %request_id, status = status.as_u16(), %message, "admin API returned an error");
            return Err(AppError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            AppError::SerializationFailure(format!("invalid JSON response from {url}: {e}"))
        })
    }
}

#[async_trait]
impl AdminTransport for HttpTransport {
    async fn get(&self, path: &str) -> AppResult<Value> {
        self.execute(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
        self.execute(Method::Post, path, body).await
    }

    async fn put(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
        self.execute(Method::Put, path, body).await
    }

    async fn delete(&self, path: &str) -> AppResult<Value> {
        self.execute(Method::Delete, path, None).await
    }
}

/// Extracts a readable message from an error body.
///
/// The server reports errors as `{"detail": ...}` or `{"message": ...}`;
/// anything else is returned as raw text.
fn error_message(status: StatusCode, text: &str) -> String {
    if let Ok(body) = serde_json::from_str::<Value>(text) {
        if let Some(field) = body.get("detail").or_else(|| body.get("message")) {
            return match field {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
        }
    }

    let text = text.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        text.to_string()
    }
}
