//! Dependency wiring.
//!
//! Picks the store and cache backends named in [`AppConfig`] and injects
//! them into the user service through its constructor.

use roster_config::{AppConfig, CacheConfig, CacheKind, DatabaseConfig, DatabaseKind};
use roster_core::RosterResult;
use roster_repository::{
    connect_postgres, connect_sqlite, InMemoryUserStore, PostgresUserStore, SqliteUserStore,
    UserStore,
};
use roster_service::{
    CacheInterface, InMemoryCache, NoopCache, RedisCacheService, UserService, UserServiceImpl,
};
use std::sync::Arc;
use tracing::info;

/// Connects the configured store and brings its schema up to date.
pub async fn build_store(config: &DatabaseConfig) -> RosterResult<Arc<dyn UserStore>> {
    let store: Arc<dyn UserStore> = match config.kind {
        DatabaseKind::Postgres => {
            let pool = connect_postgres(config).await?;
            Arc::new(PostgresUserStore::new(pool))
        }
        DatabaseKind::Sqlite => {
            let pool = connect_sqlite(config).await?;
            Arc::new(SqliteUserStore::new(pool))
        }
        DatabaseKind::Memory => Arc::new(InMemoryUserStore::new()),
    };

    store.run_migrations().await?;
    info!("User store ready ({})", store.backend_name());
    Ok(store)
}

/// Builds the configured cache backend.
pub fn build_cache(config: &CacheConfig) -> RosterResult<Arc<dyn CacheInterface>> {
    let cache: Arc<dyn CacheInterface> = match config.kind {
        CacheKind::Redis => Arc::new(RedisCacheService::from_url(&config.url, config.pool_size)?),
        CacheKind::Memory => Arc::new(InMemoryCache::new(config.max_capacity)),
        CacheKind::None => Arc::new(NoopCache),
    };

    info!(
        "Cache ready ({}, enabled: {})",
        cache.backend_name(),
        cache.is_enabled()
    );
    Ok(cache)
}

/// Builds the user service over an already-built store and cache.
pub fn build_user_service(
    store: Arc<dyn UserStore>,
    cache: Arc<dyn CacheInterface>,
    config: &CacheConfig,
) -> Arc<dyn UserService> {
    Arc::new(UserServiceImpl::with_ttl(store, cache, config.ttl()))
}

/// Wires the user service and its backends from configuration.
pub async fn build_app_service(config: &AppConfig) -> RosterResult<Arc<dyn UserService>> {
    let store = build_store(&config.database).await?;
    let cache = build_cache(&config.cache)?;
    Ok(build_user_service(store, cache, &config.cache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{Email, NewUser};

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.kind = DatabaseKind::Memory;
        config.cache.kind = CacheKind::Memory;
        config
    }

    #[tokio::test]
    async fn test_build_app_service_in_memory() {
        let config = memory_config();
        assert_eq!(build_store(&config.database).await.unwrap().backend_name(), "memory");
        assert_eq!(build_cache(&config.cache).unwrap().backend_name(), "memory");

        let user_service = build_app_service(&config).await.unwrap();
        let new_user = NewUser::new("Ann", Email::new("ann@x.com").unwrap(), 30).unwrap();
        let user = user_service.create_user(new_user).await.unwrap();
        assert_eq!(user_service.get_user(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_build_store_sqlite_in_memory() {
        let mut config = memory_config();
        config.database.kind = DatabaseKind::Sqlite;
        config.database.path = ":memory:".to_string();

        let store = build_store(&config.database).await.unwrap();
        assert_eq!(store.backend_name(), "sqlite");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_build_cache_variants() {
        let mut config = CacheConfig::default();

        config.kind = CacheKind::None;
        assert!(!build_cache(&config).unwrap().is_enabled());

        config.kind = CacheKind::Memory;
        assert!(build_cache(&config).unwrap().is_enabled());
    }

    #[tokio::test]
    async fn test_build_cache_redis_is_lazy() {
        let config = CacheConfig {
            kind: CacheKind::Redis,
            url: "redis://127.0.0.1:1".to_string(),
            ..CacheConfig::default()
        };
        assert_eq!(build_cache(&config).unwrap().backend_name(), "redis");
    }
}
