//! Table models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::null_as_default;

/// A table discovered in a connected database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableInfo {
    pub database_id: String,
    pub table_id: String,
    pub tablename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Whether the table is selected for use.
    #[serde(default)]
    pub is_choose: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Table ids to select; sent as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct ChooseTablesRequest {
    #[validate(length(min = 1, message = "At least one table must be chosen"))]
    pub table_ids: Vec<String>,
}

impl<S: Into<String>> FromIterator<S> for ChooseTablesRequest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            table_ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
