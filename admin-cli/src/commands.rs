//! Subcommands and their mapping onto client operations.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use common::models::{
    ChooseTablesRequest, ConnectInfo, CreateDatabaseRequest, DbType, UpdateDatabaseRequest,
};
use serde_json::Value;
use sql_database_client::{AdminTransport, DatabaseConnectionClient};
use tracing::info;
use validator::Validate;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered database connections
    List,

    /// Register a new database connection
    Create(CreateArgs),

    /// Show one connection and its tables
    Info { db_id: String },

    /// Rename or re-describe a connection
    Update(UpdateArgs),

    /// Remove a connection
    Delete { db_id: String },

    /// Select tables of a connection for use
    ChooseTables {
        db_id: String,
        #[arg(required = true)]
        table_ids: Vec<String>,
    },

    /// Replace the table settings of a connection
    UpdateTables {
        db_id: String,
        /// Table settings as JSON
        #[arg(long, value_parser = parse_json)]
        body: Value,
    },

    /// Show the selected tables of a connection
    SelectedTables { db_id: String },

    /// Deselect one table
    UnchooseTable { db_id: String, table_id: String },

    /// Build the knowledge graph from the registered connections
    CreateGraph,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Display name, unique on the server
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// mysql, postgres or sqlite
    #[arg(long, default_value_t = DbType::MySQL)]
    pub db_type: DbType,

    #[arg(long)]
    pub host: String,

    /// Defaults to the standard port of the database type
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub user: String,

    #[arg(long, env = "SQL_DB_PASSWORD", hide_env_values = true, default_value = "")]
    pub password: String,

    /// Database (schema) name
    #[arg(long)]
    pub database: String,

    /// Sharing settings as JSON
    #[arg(long, value_parser = parse_json)]
    pub share_config: Option<Value>,
}

impl CreateArgs {
    pub fn into_request(self) -> Result<CreateDatabaseRequest> {
        let port = self
            .port
            .or_else(|| self.db_type.default_port())
            .ok_or_else(|| anyhow!("--port is required for {} connections", self.db_type))?;

        let mut req = CreateDatabaseRequest::new(self.name, self.description)
            .with_db_type(self.db_type)
            .with_connect_info(ConnectInfo {
                host: self.host,
                port,
                user: self.user,
                password: self.password,
                database: self.database,
            });
        req.share_config = self.share_config;
        req.validate()?;

        Ok(req)
    }
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub db_id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Sharing settings as JSON
    #[arg(long, value_parser = parse_json)]
    pub share_config: Option<Value>,

    /// Semicolon separated ids of related connections
    #[arg(long)]
    pub related_db_ids: Option<String>,
}

impl UpdateArgs {
    pub fn into_request(self) -> Result<(String, UpdateDatabaseRequest)> {
        let req = UpdateDatabaseRequest {
            name: self.name,
            description: self.description,
            share_config: self.share_config,
            related_db_ids: self.related_db_ids,
        };
        req.validate()?;

        Ok((self.db_id, req))
    }
}

fn parse_json(s: &str) -> std::result::Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}

/// Runs one subcommand and returns the server's response.
pub async fn run<T: AdminTransport>(
    client: &DatabaseConnectionClient<T>,
    command: Command,
) -> Result<Value> {
    let output: Value = match command {
        Command::List => client.list_databases().await?,
        Command::Create(args) => {
            let req = args.into_request()?;
            info!(name = %req.database_name, db_type = %req.db_type, "注册数据库连接");
            client.create_database(&req).await?
        }
        Command::Info { db_id } => client.get_database_info(&db_id).await?,
        Command::Update(args) => {
            let (db_id, req) = args.into_request()?;
            client.update_database(&db_id, &req).await?
        }
        Command::Delete { db_id } => {
            info!(db_id = %db_id, "删除数据库连接");
            client.delete_database(&db_id).await?
        }
        Command::ChooseTables { db_id, table_ids } => {
            let selection: ChooseTablesRequest = table_ids.into_iter().collect();
            selection.validate()?;
            client.choose_database_tables(&db_id, &selection).await?
        }
        Command::UpdateTables { db_id, body } => client.update_tables(&db_id, &body).await?,
        Command::SelectedTables { db_id } => client.get_selected_tables(&db_id).await?,
        Command::UnchooseTable { db_id, table_id } => {
            client.unchoose_table(&db_id, &table_id).await?
        }
        Command::CreateGraph => client.create_graph_from_databases().await?,
    };

    Ok(output)
}
