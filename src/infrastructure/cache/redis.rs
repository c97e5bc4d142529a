//! Redis cache implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::config::CacheConfig;
use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for the Redis cache
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379")
    pub url: String,
    /// Connection timeout
    pub connection_timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisCacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}

impl From<&CacheConfig> for RedisCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self::new(config.url.clone()).with_connection_timeout(config.connection_timeout())
    }
}

/// Redis-backed implementation of the cache port
///
/// The ConnectionManager multiplexes one connection and reconnects on
/// failure; clones share it, so one instance serves all concurrent calls.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisCache {
    pub async fn new(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::cache(format!("failed to create Redis client: {}", e)))?;

        let connection = tokio::time::timeout(
            config.connection_timeout,
            ConnectionManager::new(client),
        )
        .await
        .map_err(|_| DomainError::cache("timed out connecting to Redis"))?
        .map_err(|e| DomainError::cache(format!("failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    pub async fn with_url(url: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(RedisCacheConfig::new(url)).await
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let mut conn = self.connection.clone();

        let result: Option<Vec<u8>> = conn
            .get(key)
            .await
            .map_err(|e| DomainError::cache(format!("failed to get key '{}': {}", key, e)))?;

        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        // A zero TTL stores without expiry; eviction stays with the server.
        if ttl.is_zero() {
            let _: () = conn
                .set(key, value)
                .await
                .map_err(|e| DomainError::cache(format!("failed to set key '{}': {}", key, e)))?;
        } else {
            let ttl_secs = ttl.as_secs().max(1);
            let _: () = conn
                .set_ex(key, value, ttl_secs)
                .await
                .map_err(|e| DomainError::cache(format!("failed to set key '{}': {}", key, e)))?;
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let _: i32 = conn
            .del(key)
            .await
            .map_err(|e| DomainError::cache(format!("failed to delete key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| DomainError::cache(format!("ping failed: {}", e)))?;

        Ok(())
    }

    async fn close(&self) -> Result<(), DomainError> {
        // The ConnectionManager closes its connection when the last clone is
        // dropped; there is nothing to tear down eagerly.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests require a running Redis instance:
    // cargo test -- --ignored

    fn test_config() -> RedisCacheConfig {
        RedisCacheConfig::new("redis://127.0.0.1:6379")
    }

    #[test]
    fn test_config_from_cache_config() {
        let app_cache = CacheConfig {
            url: "redis://cache.internal:6380".to_string(),
            connection_timeout_secs: 2,
            ..Default::default()
        };

        let config = RedisCacheConfig::from(&app_cache);
        assert_eq!(config.url, "redis://cache.internal:6380");
        assert_eq!(config.connection_timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_and_get() {
        let cache = RedisCache::new(test_config()).await.unwrap();

        cache
            .set("translate:test:key1", b"value1", Duration::from_secs(60))
            .await
            .unwrap();

        let result = cache.get("translate:test:key1").await.unwrap();
        assert_eq!(result, Some(b"value1".to_vec()));

        cache.delete("translate:test:key1").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_absent_key_is_none() {
        let cache = RedisCache::new(test_config()).await.unwrap();

        let result = cache.get("translate:test:missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_zero_ttl_persists() {
        let cache = RedisCache::new(test_config()).await.unwrap();

        cache
            .set("translate:test:forever", b"value", Duration::ZERO)
            .await
            .unwrap();

        let result = cache.get("translate:test:forever").await.unwrap();
        assert_eq!(result, Some(b"value".to_vec()));

        cache.delete("translate:test:forever").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_ping() {
        let cache = RedisCache::new(test_config()).await.unwrap();
        cache.ping().await.unwrap();
    }
}
