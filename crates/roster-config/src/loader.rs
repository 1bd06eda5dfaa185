//! Configuration loader with layered sources.

use crate::{AppConfig, CacheKind, DatabaseKind};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use roster_core::{RosterError, RosterResult};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Flat variables from older deployments and the config keys they override.
const LEGACY_VARIABLES: [(&str, &str); 10] = [
    ("DB_TYPE", "database.kind"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("DB_SSL_MODE", "database.ssl_mode"),
    ("DB_PATH", "database.path"),
    ("SERVER_PORT", "server.port"),
    ("REDIS_URL", "cache.url"),
];

/// Longest TTL the cache layer will honor, in seconds.
const TTL_CEILING_SECS: u64 = 3600;

/// Configuration loader.
///
/// Configuration is loaded from multiple sources in order:
/// 1. `.env.dev`, then `.env` (process environment only)
/// 2. `config/default.toml` - Default values
/// 3. `config/{environment}.toml` - Environment-specific overrides
/// 4. `config/local.toml` - Local overrides
/// 5. Environment variables with `ROSTER__` prefix
/// 6. Flat `DB_*`, `SERVER_PORT` and `REDIS_URL` variables
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    vars: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Creates a loader reading from `config_dir` and the process environment.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            vars: None,
        }
    }

    /// Creates a loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Replaces the process environment with a fixed set of variables.
    #[must_use]
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> RosterResult<AppConfig> {
        if self.vars.is_none() {
            Self::load_dotenv();
        }

        let environment = self
            .var("ROSTER_ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        // File layers
        for name in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        // ROSTER__SECTION__KEY variables
        builder = builder.add_source(
            Environment::with_prefix("ROSTER")
                .separator("__")
                .try_parsing(true)
                .source(self.vars.clone()),
        );

        builder = self.apply_legacy_overrides(builder)?;

        let app_config = builder
            .build()
            .and_then(Config::try_deserialize::<AppConfig>)
            .map_err(config_error_to_roster_error)?;

        validate_config(&app_config)?;

        info!(
            "Configuration loaded: database={}, cache={}, port={}",
            app_config.database.kind, app_config.cache.kind, app_config.server.port
        );
        Ok(app_config)
    }

    fn load_dotenv() {
        // dotenvy never overwrites variables that are already set, so `.env.dev`
        // wins over `.env`.
        for file in [".env.dev", ".env"] {
            match dotenvy::from_filename(file) {
                Ok(path) => debug!("Loaded environment from {}", path.display()),
                Err(e) => debug!("No {} loaded: {}", file, e),
            }
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        match &self.vars {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        }
        .filter(|value| !value.is_empty())
    }

    fn apply_legacy_overrides(
        &self,
        mut builder: ConfigBuilder<DefaultState>,
    ) -> RosterResult<ConfigBuilder<DefaultState>> {
        for (variable, key) in LEGACY_VARIABLES {
            if let Some(value) = self.var(variable) {
                debug!("Applying {} to {}", variable, key);
                let value = if variable == "DB_TYPE" {
                    value.to_lowercase()
                } else {
                    value
                };
                builder = builder
                    .set_override(key, value)
                    .map_err(config_error_to_roster_error)?;
            }
        }
        Ok(builder)
    }
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> RosterResult<()> {
    let database = &config.database;
    match database.kind {
        DatabaseKind::Postgres if database.host.trim().is_empty() => {
            return Err(RosterError::Configuration(
                "Database host is required for postgres".to_string(),
            ));
        }
        DatabaseKind::Postgres if database.name.trim().is_empty() => {
            return Err(RosterError::Configuration(
                "Database name is required for postgres".to_string(),
            ));
        }
        DatabaseKind::Sqlite if database.path.trim().is_empty() => {
            return Err(RosterError::Configuration(
                "Database path is required for sqlite".to_string(),
            ));
        }
        _ => {}
    }

    if database.kind != DatabaseKind::Memory && database.max_connections == 0 {
        return Err(RosterError::Configuration(
            "database.max_connections must be at least 1".to_string(),
        ));
    }

    if config.cache.kind == CacheKind::Redis && config.cache.url.trim().is_empty() {
        return Err(RosterError::Configuration(
            "Cache URL is required for redis".to_string(),
        ));
    }

    if config.cache.ttl_secs > TTL_CEILING_SECS {
        warn!(
            "cache.ttl_secs={} exceeds {}s and will be clamped",
            config.cache.ttl_secs, TTL_CEILING_SECS
        );
    }

    Ok(())
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}
