//! Caching infrastructure for the service layer.
//!
//! A byte-oriented [`CacheInterface`] with Redis, in-process and no-op
//! backends, plus typed JSON helpers in [`CacheExt`].

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod noop_cache;
mod redis_cache;

pub use cache_interface::{
    decode, effective_ttl, encode, CacheExt, CacheInterface, DEFAULT_TTL, MAX_TTL,
};
pub use memory_cache::InMemoryCache;
pub use noop_cache::NoopCache;
pub use redis_cache::RedisCacheService;
