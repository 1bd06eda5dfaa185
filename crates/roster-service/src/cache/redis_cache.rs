//! Redis-based cache implementation.

use super::cache_interface::{effective_ttl, CacheInterface};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, PoolConfig, Runtime};
use roster_core::{RosterError, RosterResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache service.
///
/// Uses `GET`, `SET EX` and multi-key `DEL`.
#[derive(Clone)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Arc<Pool>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Builds the connection pool for `url`.
    ///
    /// Connections are opened lazily, so an unreachable server surfaces on
    /// the first cache call, not here.
    pub fn from_url(url: &str, pool_size: usize) -> RosterResult<Self> {
        let mut config = Config::from_url(url);
        config.pool = Some(PoolConfig::new(pool_size.max(1)));

        let pool = config.create_pool(Some(Runtime::Tokio1)).map_err(|e| {
            RosterError::Configuration(format!("Failed to create Redis pool: {}", e))
        })?;

        info!("Redis cache pool created (max size {})", pool_size.max(1));
        Ok(Self::new(Arc::new(pool)))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> RosterResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| RosterError::Cache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<Vec<u8>>> {
        let mut conn = self.get_conn().await?;
        let value: Option<Vec<u8>> = conn
            .get(key)
            .await
            .map_err(|e| RosterError::Cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &[u8], ttl: Duration) -> RosterResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = effective_ttl(ttl).as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| RosterError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> RosterResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(keys)
            .await
            .map_err(|e| RosterError::Cache(format!("Failed to delete keys {:?}: {}", keys, e)))?;

        debug!("Deleted {} of keys {:?}", deleted, keys);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_is_created_lazily() {
        let cache = RedisCacheService::from_url("redis://127.0.0.1:1", 2).unwrap();
        assert!(cache.is_enabled());
        assert_eq!(cache.backend_name(), "redis");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_cache_error() {
        let cache = RedisCacheService::from_url("redis://127.0.0.1:1", 1).unwrap();
        let err = cache.get_raw("user:1").await.unwrap_err();
        assert!(err.is_cache_error());
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let err = RedisCacheService::from_url("not a url", 1).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
