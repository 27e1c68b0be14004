//! Shared building blocks for the SQL database admin client.
//!
//! - `config`: client configuration loaded from the environment
//! - `errors`: the error taxonomy every transport reports with
//! - `models`: typed request bodies and response views
//! - `request_id`: per-request correlation ids

pub mod config;
pub mod errors;
pub mod models;
pub mod request_id;

pub use config::ClientConfig;
pub use errors::{AppError, AppResult};
pub use request_id::{RequestId, REQUEST_ID_HEADER};
