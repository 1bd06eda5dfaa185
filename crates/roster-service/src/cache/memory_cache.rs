//! In-process cache backed by moka.

use super::cache_interface::{effective_ttl, CacheInterface};
use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use roster_core::RosterResult;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone)]
struct Entry {
    bytes: Arc<[u8]>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-local cache with per-entry expiration.
#[derive(Clone)]
pub struct InMemoryCache {
    inner: Cache<String, Entry>,
}

impl InMemoryCache {
    /// Creates a cache holding at most `max_capacity` entries.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { inner }
    }

    /// Checks if `key` currently holds a live entry.
    pub async fn contains(&self, key: &str) -> bool {
        self.inner.get(key).await.is_some()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<Vec<u8>>> {
        let value = self.inner.get(key).await.map(|entry| entry.bytes.to_vec());

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &[u8], ttl: Duration) -> RosterResult<()> {
        let ttl = effective_ttl(ttl);
        let entry = Entry {
            bytes: Arc::from(value),
            ttl,
        };
        self.inner.insert(key.to_string(), entry).await;

        debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> RosterResult<()> {
        for key in keys {
            self.inner.invalidate(key).await;
        }
        debug!("Deleted keys {:?}", keys);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = InMemoryCache::default();
        cache.set_raw("user:1", b"ann", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.get_raw("user:1").await.unwrap(), Some(b"ann".to_vec()));

        cache
            .delete(&["user:1".to_string(), "users:all".to_string()])
            .await
            .unwrap();
        assert_eq!(cache.get_raw("user:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let cache = InMemoryCache::default();
        assert_eq!(cache.get_raw("nope").await.unwrap(), None);
        cache.delete(&["nope".to_string()]).await.unwrap();
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = InMemoryCache::default();
        cache.set_raw("k", b"v", Duration::from_millis(50)).await.unwrap();
        assert!(cache.contains("k").await);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(!cache.contains("k").await);
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let cache = InMemoryCache::default();
        cache.set("nums", &vec![1, 2, 3], Duration::ZERO).await.unwrap();
        let nums: Option<Vec<i32>> = cache.get("nums").await.unwrap();
        assert_eq!(nums, Some(vec![1, 2, 3]));
    }
}
