//! Connection bootstrap for the relational store.
//!
//! The connection (a pooled handle) is created once by the binary and handed to
//! repositories by value; nothing here keeps global state.
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use log::LevelFilter;
use tracing::info;

pub use configs::DatabaseConfig;

/// Connect using `DATABASE_URL` (or the split `DATABASE_*` variables) and default pool settings.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    let cfg = DatabaseConfig::from_env();
    cfg.validate()?;
    connect_with_config(&cfg).await
}

pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging)
        .sqlx_logging_level(LevelFilter::Debug);
    opt
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    info!(max_connections = cfg.max_connections, sqlx_logging = cfg.sqlx_logging, "database_connected");
    Ok(db)
}

/// Round-trip a trivial query to make sure the pool hands out working connections.
pub async fn test_connection(db: &DatabaseConnection) -> anyhow::Result<()> {
    db.query_one(Statement::from_string(DbBackend::Postgres, "SELECT 1".to_owned())).await?;
    Ok(())
}
