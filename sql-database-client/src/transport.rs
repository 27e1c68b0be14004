//! Transport abstraction.
//!
//! The client only knows these four verbs. Authentication, encoding, status
//! mapping and connection handling all belong to the implementation.

use std::sync::Arc;

use async_trait::async_trait;
use common::errors::AppResult;
use serde_json::Value;

use crate::request::{ApiRequest, Method};

/// Four-verb transport to the admin API.
///
/// Paths are relative to the API prefix (e.g. `/database/db_1`). Each call
/// resolves to the parsed JSON response or a classified [`AppError`].
///
/// [`AppError`]: common::errors::AppError
#[async_trait]
pub trait AdminTransport: Send + Sync {
    async fn get(&self, path: &str) -> AppResult<Value>;

    async fn post(&self, path: &str, body: Option<Value>) -> AppResult<Value>;

    async fn put(&self, path: &str, body: Option<Value>) -> AppResult<Value>;

    async fn delete(&self, path: &str) -> AppResult<Value>;

    /// Dispatches a prepared request to the matching verb.
    async fn send(&self, request: ApiRequest) -> AppResult<Value> {
        let ApiRequest { method, path, body } = request;
        match method {
            Method::Get => self.get(&path).await,
            Method::Post => self.post(&path, body).await,
            Method::Put => self.put(&path, body).await,
            Method::Delete => self.delete(&path).await,
        }
    }
}

#[async_trait]
impl<T: AdminTransport + ?Sized> AdminTransport for Arc<T> {
    async fn get(&self, path: &str) -> AppResult<Value> {
        (**self).get(path).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
        (**self).post(path, body).await
    }

    async fn put(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
        (**self).put(path, body).await
    }

    async fn delete(&self, path: &str) -> AppResult<Value> {
        (**self).delete(path).await
    }
}

#[async_trait]
impl<T: AdminTransport + ?Sized> AdminTransport for Box<T> {
    async fn get(&self, path: &str) -> AppResult<Value> {
        (**self).get(path).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
        (**self).post(path, body).await
    }

    async fn put(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
        (**self).put(path, body).await
    }

    async fn delete(&self, path: &str) -> AppResult<Value> {
        (**self).delete(path).await
    }
}
