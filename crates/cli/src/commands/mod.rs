//! CLI subcommands.

pub mod ledger;
pub mod migrate;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

use hielitos_admin::config::{AdminConfig, ConfigError};
use hielitos_admin::db::{self, Store};

/// Errors shared by commands that talk to the database.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Open a pool to the database named by `DATABASE_URL`.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the connection fails.
pub async fn connect_pool() -> Result<PgPool, CommandError> {
    let config = AdminConfig::from_env()?;
    let url = config
        .database_url
        .as_ref()
        .ok_or(CommandError::MissingEnvVar("DATABASE_URL"))?;
    let pool = db::create_pool(url).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}

/// Connect to the `PostgreSQL` document store.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or the connection fails.
pub async fn connect() -> Result<Store, CommandError> {
    Ok(Store::postgres(connect_pool().await?))
}
