//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Store configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "roster".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Enable permissive CORS.
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    Postgres,
    Sqlite,
    /// Process-local store, nothing persisted.
    Memory,
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Backend kind.
    pub kind: DatabaseKind,
    /// PostgreSQL host.
    pub host: String,
    /// PostgreSQL port.
    pub port: u16,
    /// PostgreSQL user.
    pub user: String,
    /// PostgreSQL password.
    pub password: String,
    /// PostgreSQL database name.
    pub name: String,
    /// PostgreSQL `sslmode`.
    pub ssl_mode: String,
    /// SQLite file path (`:memory:` for an in-memory database).
    pub path: String,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            kind: DatabaseKind::Postgres,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "roster".to_string(),
            ssl_mode: "disable".to_string(),
            path: "roster.db".to_string(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

impl DatabaseConfig {
    /// Builds the connection URL for the configured backend.
    ///
    /// Returns `None` for the in-memory store.
    #[must_use]
    pub fn connection_url(&self) -> Option<String> {
        match self.kind {
            DatabaseKind::Sqlite if self.path == ":memory:" => Some("sqlite::memory:".to_string()),
            DatabaseKind::Sqlite => Some(format!("sqlite://{}?mode=rwc", self.path)),
            DatabaseKind::Postgres => {
                let credentials = if self.password.is_empty() {
                    self.user.clone()
                } else {
                    format!("{}:{}", self.user, self.password)
                };
                let mut url = format!(
                    "postgres://{}@{}:{}/{}",
                    credentials, self.host, self.port, self.name
                );
                if !self.ssl_mode.is_empty() {
                    url.push_str("?sslmode=");
                    url.push_str(&self.ssl_mode);
                }
                Some(url)
            }
            DatabaseKind::Memory => None,
        }
    }

    /// Same as `connection_url` with the password masked, for logs.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        let mut redacted = self.clone();
        if !redacted.password.is_empty() {
            redacted.password = "****".to_string();
        }
        redacted
            .connection_url()
            .unwrap_or_else(|| "memory".to_string())
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Which cache backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    Redis,
    /// In-process cache.
    #[default]
    Memory,
    /// Caching disabled; every read goes to the store.
    None,
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Backend kind.
    pub kind: CacheKind,
    /// Redis URL.
    pub url: String,
    /// Entry time-to-live in seconds.
    pub ttl_secs: u64,
    /// Redis connection pool size.
    pub pool_size: usize,
    /// Maximum entries held by the in-process cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            kind: CacheKind::Memory,
            url: "redis://localhost:6379".to_string(),
            ttl_secs: 300,
            pool_size: 10,
            max_capacity: 10_000,
        }
    }
}

impl CacheConfig {
    /// Returns the configured TTL as a Duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log format: `pretty` or `json`.
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Checks if JSON log output is requested.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
