//! User service implementation.

use crate::cache::{cache_keys, decode, effective_ttl, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{NewUser, RosterResult, User, UserId, UserPatch};
use roster_repository::UserStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// User service over a store and a cache.
///
/// Policy: cache on read miss, invalidate on write. A failing cache only
/// costs freshness or speed; the store stays the source of truth and its
/// errors are returned unchanged.
pub struct UserServiceImpl {
    store: Arc<dyn UserStore>,
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl UserServiceImpl {
    /// Creates a service caching entries for [`DEFAULT_TTL`].
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, cache: Arc<dyn CacheInterface>) -> Self {
        Self::with_ttl(store, cache, DEFAULT_TTL)
    }

    /// Creates a service with a custom TTL (zero means default, capped at `MAX_TTL`).
    #[must_use]
    pub fn with_ttl(
        store: Arc<dyn UserStore>,
        cache: Arc<dyn CacheInterface>,
        ttl: Duration,
    ) -> Self {
        let effective = effective_ttl(ttl);
        if effective < ttl {
            warn!(
                "Cache TTL of {}s clamped to {}s",
                ttl.as_secs(),
                effective.as_secs()
            );
        }
        Self {
            store,
            cache,
            ttl: effective,
        }
    }

    /// TTL applied to cached entries.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Reads `key`, treating any cache failure as a miss.
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.cache.get_raw(key).await {
            Ok(bytes) => bytes?,
            Err(e) => {
                warn!("Cache read for '{}' failed, using store: {}", key, e);
                return None;
            }
        };

        match decode(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Evicting undecodable cache entry '{}': {}", key, e);
                if let Err(e) = self.cache.delete(&[key.to_string()]).await {
                    warn!("Failed to evict '{}': {}", key, e);
                }
                None
            }
        }
    }

    /// Stores a freshly read value; failures are logged only.
    async fn populate<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value, self.ttl).await {
            warn!("Failed to cache '{}': {}", key, e);
        }
    }

    /// Removes entries made stale by a write; failures are logged only.
    async fn invalidate(&self, keys: &[String]) {
        if let Err(e) = self.cache.delete(keys).await {
            warn!(
                "Cache invalidation of {:?} failed, entries may be stale for up to {}s: {}",
                keys,
                self.ttl.as_secs(),
                e
            );
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, new_user: NewUser) -> RosterResult<User> {
        debug!("Creating user: {}", new_user.email);

        let user = self.store.create(new_user).await?;
        self.invalidate(&[cache_keys::ALL_USERS.to_string()]).await;

        info!("User created: {}", user.id);
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> RosterResult<User> {
        debug!("Getting user: {}", id);

        let key = cache_keys::user_by_id(id);
        if let Some(user) = self.cached::<User>(&key).await {
            return Ok(user);
        }

        let user = self.store.get_by_id(id).await?;
        self.populate(&key, &user).await;
        Ok(user)
    }

    async fn list_users(&self) -> RosterResult<Vec<User>> {
        debug!("Listing users");

        if let Some(users) = self.cached::<Vec<User>>(cache_keys::ALL_USERS).await {
            return Ok(users);
        }

        let users = self.store.list().await?;
        self.populate(cache_keys::ALL_USERS, &users).await;
        Ok(users)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> RosterResult<User> {
        debug!("Updating user: {}", id);

        let user = self.store.update(id, patch).await?;
        self.invalidate(&cache_keys::user_write_set(id)).await;

        info!("User updated: {}", id);
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        self.store.delete(id).await?;
        self.invalidate(&cache_keys::user_write_set(id)).await;

        info!("User deleted: {}", id);
        Ok(())
    }

    async fn health_check(&self) -> RosterResult<()> {
        self.store.health_check().await
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("store", &self.store.backend_name())
            .field("cache", &self.cache.backend_name())
            .field("ttl", &self.ttl)
            .finish()
    }
}
