//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use seatbook_config::RedisConfig;
use seatbook_core::{SeatbookError, SeatbookResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache service.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool; `None` disables caching.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Builds the connection pool described by `config`.
    ///
    /// Connections are opened lazily, so an unreachable Redis only shows up
    /// as cache misses.
    pub fn create_pool(config: &RedisConfig) -> SeatbookResult<Arc<Pool>> {
        let mut cfg = deadpool_redis::Config::from_url(&config.url);
        cfg.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size as usize));
        let pool = cfg
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| {
                SeatbookError::Configuration(format!("Failed to create Redis pool: {}", e))
            })?;
        info!("Redis cache pool created (max {} connections)", config.pool_size);
        Ok(Arc::new(pool))
    }

    /// Create a no-op cache service (for when caching is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Shaku parameters for this service.
    #[must_use]
    pub fn into_parameters(self) -> RedisCacheServiceParameters {
        RedisCacheServiceParameters { pool: self.pool }
    }

    /// Drops idle connections and refuses new ones.
    pub fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> SeatbookResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                SeatbookError::CacheUnavailable(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(SeatbookError::CacheUnavailable(
                "Cache is disabled".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> SeatbookResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            SeatbookError::CacheUnavailable(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> SeatbookResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| {
                SeatbookError::CacheUnavailable(format!("Failed to set key '{}': {}", key, e))
            })?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> SeatbookResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            SeatbookError::CacheUnavailable(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn ping(&self) -> SeatbookResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| SeatbookError::CacheUnavailable(format!("Redis PING failed: {}", e)))?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
