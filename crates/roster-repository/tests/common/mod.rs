//! Common test infrastructure for store integration tests.

#![allow(dead_code)]

use roster_config::{DatabaseConfig, DatabaseKind};
use roster_core::{Email, NewUser};
use roster_repository::{
    connect_postgres, connect_sqlite, PostgresUserStore, SqliteUserStore, UserStore,
};
use std::path::Path;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

/// Builds a validated `NewUser`.
pub fn new_user(name: &str, email: &str, age: u8) -> NewUser {
    NewUser::new(name, Email::new(email).expect("valid email"), age).expect("valid user")
}

/// Creates a SQLite store over a private in-memory database.
pub async fn sqlite_store() -> SqliteUserStore {
    let config = DatabaseConfig {
        kind: DatabaseKind::Sqlite,
        path: ":memory:".to_string(),
        max_connections: 1,
        ..DatabaseConfig::default()
    };
    let pool = connect_sqlite(&config).await.expect("Failed to open SQLite");
    let store = SqliteUserStore::new(pool);
    store.run_migrations().await.expect("Failed to create schema");
    store
}

/// Creates a SQLite store over a database file with a multi-connection pool.
pub async fn sqlite_file_store(path: &Path, max_connections: u32) -> SqliteUserStore {
    let config = DatabaseConfig {
        kind: DatabaseKind::Sqlite,
        path: path.to_string_lossy().into_owned(),
        max_connections,
        ..DatabaseConfig::default()
    };
    let pool = connect_sqlite(&config).await.expect("Failed to open SQLite file");
    let store = SqliteUserStore::new(pool);
    store.run_migrations().await.expect("Failed to create schema");
    store
}

/// Test database container wrapper.
///
/// Manages a PostgreSQL testcontainer lifecycle and provides a store.
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    store: PostgresUserStore,
}

impl TestDatabase {
    /// Creates a new test database with a fresh PostgreSQL container.
    ///
    /// Creates the schema after container startup.
    pub async fn new() -> Self {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get PostgreSQL port");

        let config = DatabaseConfig {
            kind: DatabaseKind::Postgres,
            host: "127.0.0.1".to_string(),
            port,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "postgres".to_string(),
            ssl_mode: "disable".to_string(),
            max_connections: 5,
            ..DatabaseConfig::default()
        };

        let store = Self::connect_with_retry(&config, 30).await;
        store
            .run_migrations()
            .await
            .expect("Failed to create schema");

        Self {
            _container: container,
            store,
        }
    }

    /// Returns the store.
    pub fn store(&self) -> &PostgresUserStore {
        &self.store
    }

    /// Connects to the database with retry logic.
    async fn connect_with_retry(config: &DatabaseConfig, max_attempts: u32) -> PostgresUserStore {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match connect_postgres(config).await {
                Ok(pool) => return PostgresUserStore::new(pool),
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!(
                            "Failed to connect to database after {} attempts: {}",
                            max_attempts, e
                        );
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
