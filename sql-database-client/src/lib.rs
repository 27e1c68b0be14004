//! SQL 数据库连接管理接口客户端
//!
//! Binds the admin API under `/api/sql_database`:
//! - registering, inspecting, editing and removing database connections
//! - selecting the tables of a connection that are put to use
//! - building a knowledge graph from the registered connections
//!
//! [`DatabaseConnectionClient`] maps each action onto one request.
//! The transport is injected: [`HttpTransport`] for real servers, or any
//! other [`AdminTransport`] implementation.

pub mod client;
pub mod http;
pub mod request;
pub mod routes;
pub mod transport;

pub use client::DatabaseConnectionClient;
pub use http::HttpTransport;
pub use request::{ApiRequest, Method};
pub use transport::AdminTransport;
