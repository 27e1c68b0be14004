//! Admin API paths, relative to the configured prefix.
//!
//! Identifiers are interpolated verbatim.

/// Graph backend used when materializing a knowledge graph.
pub const GRAPH_ENGINE: &str = "neo4j";

pub fn databases() -> String {
    "/databases".to_string()
}

pub fn database_collection() -> String {
    "/database".to_string()
}

pub fn database(db_id: &str) -> String {
    format!("/database/{db_id}")
}

pub fn tables(db_id: &str) -> String {
    format!("/database/{db_id}/tables")
}

pub fn choose_tables(db_id: &str) -> String {
    format!("/database/{db_id}/tables/choose")
}

pub fn selected_tables(db_id: &str) -> String {
    format!("/database/{db_id}/tables/selected")
}

pub fn table(db_id: &str, table_id: &str) -> String {
    format!("/database/{db_id}/tables/{table_id}")
}

pub fn graph() -> String {
    format!("/databases/{GRAPH_ENGINE}")
}
