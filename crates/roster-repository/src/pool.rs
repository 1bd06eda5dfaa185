//! Database connection pool management.

use roster_config::DatabaseConfig;
use roster_core::{RosterError, RosterResult};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

/// Opens a SQLite pool for `config.path`, creating the file if needed.
///
/// An in-memory database (`:memory:`) lives as long as its connections,
/// so the pool keeps a single connection open for it.
pub async fn connect_sqlite(config: &DatabaseConfig) -> RosterResult<SqlitePool> {
    let url = connection_url(config)?;
    info!("Connecting to SQLite database at {}...", config.path);

    let in_memory = config.path == ":memory:";
    let max_connections = if in_memory { 1 } else { config.max_connections };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(u32::from(in_memory))
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(config.connect_timeout())
        .connect(&url)
        .await
        .map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            RosterError::Database(format!("Failed to connect: {}", e))
        })?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Opens a PostgreSQL pool.
pub async fn connect_postgres(config: &DatabaseConfig) -> RosterResult<PgPool> {
    let url = connection_url(config)?;
    info!("Connecting to PostgreSQL database at {}...", config.redacted_url());

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .connect(&url)
        .await
        .map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            RosterError::Database(format!("Failed to connect: {}", e))
        })?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

fn connection_url(config: &DatabaseConfig) -> RosterResult<String> {
    config.connection_url().ok_or_else(|| {
        RosterError::Configuration(format!("No connection URL for database kind {}", config.kind))
    })
}
