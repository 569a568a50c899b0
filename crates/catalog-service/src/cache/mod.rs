//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with a Redis implementation. A
//! process-local implementation for tests is available behind the
//! `test-util` feature.

mod cache_interface;
pub mod cache_keys;
#[cfg(any(test, feature = "test-util"))]
mod memory_cache;
mod redis_cache;

pub use cache_interface::CacheInterface;
#[cfg(any(test, feature = "test-util"))]
pub use memory_cache::InMemoryCache;
pub use redis_cache::RedisCacheService;
