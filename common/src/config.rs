//! Client configuration.
//!
//! Loaded from environment variables. A `.env` file in the working directory
//! is read first; variables already present in the environment take
//! precedence over it.

use std::time::Duration;

use crate::errors::{AppError, AppResult};

/// Default admin server address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5050";
/// Route prefix every admin endpoint lives under.
pub const DEFAULT_API_PREFIX: &str = "/api/sql_database";
/// Per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_BASE_URL: &str = "SQL_DB_ADMIN_BASE_URL";
const ENV_API_PREFIX: &str = "SQL_DB_ADMIN_API_PREFIX";
const ENV_TOKEN: &str = "SQL_DB_ADMIN_TOKEN";
const ENV_TIMEOUT_SECS: &str = "SQL_DB_ADMIN_TIMEOUT_SECS";

/// Settings for reaching the admin API.
#[derive(Clone)]
pub struct ClientConfig {
    /// Scheme, host and port of the admin server, e.g. `http://localhost:5050`.
    pub base_url: String,
    /// Route prefix, normalized to a leading `/` and no trailing `/`.
    pub api_prefix: String,
    /// Admin bearer token.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// The token must never end up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_prefix", &self.api_prefix)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Loads configuration from `.env` and the process environment.
    pub fn load() -> AppResult<Self> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Missing variables fall back to the defaults. Empty values count as
    /// missing.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config = config.with_base_url(url)?;
        }
        if let Some(prefix) = get(ENV_API_PREFIX) {
            config = config.with_api_prefix(prefix);
        }
        if let Some(token) = get(ENV_TOKEN) {
            config = config.with_token(token);
        }
        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                AppError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Replaces the base URL. Only `http` and `https` URLs are accepted.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> AppResult<Self> {
        let base_url = base_url.into();
        let parsed = reqwest::Url::parse(base_url.trim())
            .map_err(|e| AppError::Config(format!("invalid base url {base_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "base url must use http or https, got {:?}",
                parsed.scheme()
            )));
        }
        self.base_url = base_url.trim().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Replaces the route prefix.
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim().trim_matches('/');
        self.api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    /// Sets the admin bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an admin path such as `/databases`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }
}

fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to read .env file");
        }
    }
}
