//! Cache that stores nothing.

use super::CacheInterface;
use async_trait::async_trait;
use roster_core::RosterResult;
use std::time::Duration;

/// Cache used when caching is disabled: every read misses, writes succeed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl CacheInterface for NoopCache {
    async fn get_raw(&self, _key: &str) -> RosterResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set_raw(&self, _key: &str, _value: &[u8], _ttl: Duration) -> RosterResult<()> {
        Ok(())
    }

    async fn delete(&self, _keys: &[String]) -> RosterResult<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "none"
    }
}
