//! Database connection models.
//!
//! Request bodies for registering and editing a connection, plus read views
//! over what the server returns. The views keep unknown fields in `extra` so
//! nothing the server sends is lost.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::connection::{ConnectInfo, DbType};
use super::null_as_default;
use super::table::TableInfo;

/// Request body for registering a new database connection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDatabaseRequest {
    /// Display name, unique on the server.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub database_name: String,
    /// Free-form description.
    pub description: String,
    /// Where the server should connect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_info: Option<ConnectInfo>,
    /// Database type.
    #[serde(default)]
    pub db_type: DbType,
    /// Sharing / visibility settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_config: Option<Value>,
}

impl CreateDatabaseRequest {
    /// Creates a request for a MySQL connection.
    pub fn new(database_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            description: description.into(),
            connect_info: None,
            db_type: DbType::default(),
            share_config: None,
        }
    }

    /// Sets the connection settings.
    pub fn with_connect_info(mut self, connect_info: ConnectInfo) -> Self {
        self.connect_info = Some(connect_info);
        self
    }

    /// Sets the database type.
    pub fn with_db_type(mut self, db_type: DbType) -> Self {
        self.db_type = db_type;
        self
    }
}

/// Request body for editing a registered connection.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDatabaseRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_config: Option<Value>,
    /// Semicolon separated ids of related connections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_db_ids: Option<String>,
}

/// A registered database connection as reported by the server.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub db_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub db_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_config: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_db_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Tables keyed by table id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tables: BTreeMap<String, TableInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// connect_info carries the stored password.
impl std::fmt::Debug for DatabaseInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseInfo")
            .field("db_id", &self.db_id)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("db_type", &self.db_type)
            .field("connect_info", &self.connect_info.as_ref().map(redact_password))
            .field("share_config", &self.share_config)
            .field("related_db_ids", &self.related_db_ids)
            .field("created_at", &self.created_at)
            .field("tables", &self.tables)
            .field("row_count", &self.row_count)
            .field("status", &self.status)
            .field("extra", &self.extra)
            .finish()
    }
}

fn redact_password(connect_info: &Value) -> Value {
    let mut redacted = connect_info.clone();
    if let Some(password) = redacted.get_mut("password") {
        *password = Value::String("<redacted>".to_string());
    }
    redacted
}

impl DatabaseInfo {
    /// Tables ordered newest first; tables without a timestamp come last.
    pub fn tables_by_recency(&self) -> Vec<&TableInfo> {
        let mut tables: Vec<&TableInfo> = self.tables.values().collect();
        tables.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tables
    }

    /// Tables currently selected for use.
    pub fn selected_tables(&self) -> impl Iterator<Item = &TableInfo> {
        self.tables.values().filter(|t| t.is_choose)
    }
}

/// Response of the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseList {
    #[serde(default)]
    pub databases: Vec<DatabaseInfo>,
    /// Set by the server when listing failed softly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
