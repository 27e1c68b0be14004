//! Request and response models for the admin API.

pub mod connection;
pub mod database;
pub mod table;

use serde::{Deserialize, Deserializer};

// Re-export commonly used types
pub use connection::{ConnectInfo, DbType};
pub use database::{CreateDatabaseRequest, DatabaseInfo, DatabaseList, UpdateDatabaseRequest};
pub use table::{ChooseTablesRequest, TableInfo};

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
