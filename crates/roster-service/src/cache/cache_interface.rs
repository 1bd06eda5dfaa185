//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use roster_core::RosterResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Longest TTL any entry is stored with (1 hour).
///
/// Bounds how long a missed invalidation can serve stale data.
pub const MAX_TTL: Duration = Duration::from_secs(3600);

/// Cache interface for storing and retrieving cached data.
///
/// Values are opaque bytes so the trait stays dyn-compatible; see
/// [`CacheExt`] for typed access. A missing key is `Ok(None)`, never an
/// error.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> RosterResult<Option<Vec<u8>>>;

    /// Set a raw value in the cache with a TTL.
    ///
    /// A zero TTL means [`DEFAULT_TTL`]; anything above [`MAX_TTL`] is clamped.
    async fn set_raw(&self, key: &str, value: &[u8], ttl: Duration) -> RosterResult<()>;

    /// Delete keys from the cache. Absent keys are not an error.
    async fn delete(&self, keys: &[String]) -> RosterResult<()>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Resolves the TTL an entry is actually stored with.
#[must_use]
pub fn effective_ttl(ttl: Duration) -> Duration {
    if ttl.is_zero() {
        DEFAULT_TTL
    } else {
        ttl.min(MAX_TTL)
    }
}

/// Encodes a value for the cache.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> RosterResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Decodes a cached value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> RosterResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Extension trait with typed methods for convenience.
///
/// Values are stored as JSON.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> RosterResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> RosterResult<()> {
        let bytes = encode(value)?;
        self.set_raw(key, &bytes, ttl).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
