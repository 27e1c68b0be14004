//! SQL 数据库连接管理命令行工具
//!
//! 通过管理接口维护外部数据库连接：
//! - 连接的注册、查看、修改与删除
//! - 数据表的选择与更新
//! - 根据已注册的连接构建知识图谱

mod commands;

use anyhow::Result;
use clap::Parser;
use common::config::ClientConfig;
use sql_database_client::DatabaseConnectionClient;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::Command;

#[derive(Debug, Parser)]
#[command(
    name = "sql-db-admin",
    version,
    about = "Manage SQL database connections through the admin API"
)]
struct Cli {
    /// Admin server address (overrides SQL_DB_ADMIN_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Admin bearer token (overrides SQL_DB_ADMIN_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志追踪（写到 stderr，stdout 只输出 JSON 结果）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // 加载配置，命令行参数优先
    let mut config = ClientConfig::load()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }
    info!(base_url = %config.base_url, api_prefix = %config.api_prefix, "使用管理接口");

    let client = DatabaseConnectionClient::from_config(config)?;
    let output = commands::run(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
