//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use catalog_config::RedisConfig;
use catalog_core::{CatalogError, CatalogResult, HealthCheck, HealthStatus};
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default bound on a single cache read or write.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-based cache service.
///
/// Reads and writes are bounded independently; the bound covers acquiring a
/// pooled connection as well as the command itself.
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service with default timeouts.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self::with_timeouts(pool, DEFAULT_TIMEOUT, DEFAULT_TIMEOUT)
    }

    /// Create a cache service with custom read and write timeouts.
    #[must_use]
    pub fn with_timeouts(pool: Arc<Pool>, read_timeout: Duration, write_timeout: Duration) -> Self {
        Self {
            pool: Some(pool),
            read_timeout,
            write_timeout,
        }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a cache service from configuration.
    ///
    /// The pool connects lazily, so an unreachable Redis does not prevent
    /// startup; requests simply fall back to the database.
    pub fn from_config(config: &RedisConfig) -> CatalogResult<Self> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
        redis_cfg.pool = Some(PoolConfig::new(config.pool_size as usize));
        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CatalogError::Cache(format!("Failed to create Redis pool: {e}")))?;

        Ok(Self::with_timeouts(
            Arc::new(pool),
            config.read_timeout(),
            config.write_timeout(),
        ))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CatalogError::Cache(format!("Failed to get Redis connection: {e}"))
            }),
            None => Err(CatalogError::Cache("Cache is disabled".to_string())),
        }
    }
}

/// Runs `operation`, failing with a cache error once `limit` elapses.
async fn bounded<T, F>(limit: Duration, what: &str, operation: F) -> CatalogResult<T>
where
    F: Future<Output = CatalogResult<T>>,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| CatalogError::Cache(format!("{what} timed out after {limit:?}")))?
}

/// A stored value that is not UTF-8 is a corrupt payload, not an
/// unreachable cache.
fn payload_from_bytes(key: &str, bytes: Option<Vec<u8>>) -> CatalogResult<Option<String>> {
    bytes
        .map(|bytes| {
            String::from_utf8(bytes).map_err(|e| {
                CatalogError::format(format!("Cached value for key '{key}' is not UTF-8: {e}"))
            })
        })
        .transpose()
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let bytes = bounded(self.read_timeout, "Cache read", async {
            let mut conn = self.get_conn().await?;
            let bytes: Option<Vec<u8>> = conn.get(key).await.map_err(|e| {
                CatalogError::Cache(format!("Failed to get key '{key}': {e}"))
            })?;
            Ok(bytes)
        })
        .await?;

        let value = payload_from_bytes(key, bytes)?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let ttl_secs = ttl.as_secs().max(1);

        bounded(self.write_timeout, "Cache write", async {
            let mut conn = self.get_conn().await?;
            conn.set_ex::<_, _, ()>(key, value, ttl_secs)
                .await
                .map_err(|e| CatalogError::Cache(format!("Failed to set key '{key}': {e}")))
        })
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    /// A failing cache only degrades the service; reads fall back to the
    /// database.
    async fn check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Degraded("cache is disabled".to_string());
        }

        let ping = bounded(self.read_timeout, "Cache ping", async {
            let mut conn = self.get_conn().await?;
            let _: String = deadpool_redis::redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| CatalogError::Cache(format!("PING failed: {e}")))?;
            Ok(())
        })
        .await;

        match ping {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[test]
    fn test_from_config_disabled() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        let cache = RedisCacheService::from_config(&config).unwrap();
        assert!(!cache.is_enabled());
    }

    #[test]
    fn test_from_config_uses_configured_timeouts() {
        let config = RedisConfig {
            read_timeout_ms: 250,
            write_timeout_ms: 750,
            ..RedisConfig::default()
        };
        let cache = RedisCacheService::from_config(&config).unwrap();
        assert!(cache.is_enabled());
        assert_eq!(cache.read_timeout, Duration::from_millis(250));
        assert_eq!(cache.write_timeout, Duration::from_millis(750));
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let cache = RedisCacheService::disabled();
        cache
            .set_raw("Products", "[]", Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(cache.get_raw("Products").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_disabled_cache_reports_degraded() {
        let cache = RedisCacheService::disabled();
        assert!(matches!(cache.check().await, HealthStatus::Degraded(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_times_out_as_cache_error() {
        let result: CatalogResult<()> =
            bounded(Duration::from_secs(2), "Cache read", pending()).await;
        match result {
            Err(CatalogError::Cache(message)) => assert!(message.contains("timed out")),
            other => panic!("expected cache timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_from_bytes_rejects_invalid_utf8() {
        let result = payload_from_bytes("Products", Some(vec![b'[', 0xff, b']']));
        assert!(matches!(result, Err(CatalogError::Format(_))));
    }

    #[test]
    fn test_payload_from_bytes_passes_text_and_misses() {
        let hit = payload_from_bytes("Products", Some(b"[]".to_vec())).unwrap();
        assert_eq!(hit.as_deref(), Some("[]"));
        assert_eq!(payload_from_bytes("Products", None).unwrap(), None);
    }

    #[tokio::test]
    async fn test_bounded_passes_through_result() {
        let result = bounded(Duration::from_secs(2), "Cache read", async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
