//! Error types shared by the client and its transports.
//!
//! Failures are classified once, by the transport. Everything above it
//! forwards the error unchanged.

use thiserror::Error;

/// Errors produced while talking to the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The request never produced a response (connect, timeout, IO).
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The server answered with a non-2xx status.
    #[error("server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// A body could not be encoded or a response could not be decoded.
    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    /// The client configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status of a server error.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server reported 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the server reported 409 (e.g. duplicate database name).
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::SerializationFailure(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::SerializationFailure(e.to_string())
        } else if e.is_builder() {
            AppError::Config(e.to_string())
        } else {
            AppError::NetworkFailure(e.to_string())
        }
    }
}
