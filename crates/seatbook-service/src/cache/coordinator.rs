//! Cache invalidation coordinator.
//!
//! Sits between the services and the cache port. Reads go cache first and
//! fall back to the store; writes drop the affected snapshots. Cache
//! failures and timeouts never reach the caller: a failed lookup is a miss,
//! and a failed write is logged.
//!
//! A snapshot is never rewritten from its own cached count: concurrent
//! writers would each start from the same pre-write value.

use super::{cache_keys, CacheInterface};
use async_trait::async_trait;
use seatbook_core::{EventId, SeatbookError, SeatbookResult};
use shaku::{Component, Interface};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default TTL for cached snapshots (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default upper bound on a single cache round trip.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(500);

/// Best-effort cache operations used by the services.
#[async_trait]
pub trait CacheCoordinatorInterface: Interface {
    /// Returns the snapshot stored under `key`, treating any failure as a miss.
    async fn lookup(&self, key: &str) -> Option<String>;

    /// Stores a snapshot with the default TTL.
    async fn populate(&self, key: &str, json: &str);

    /// Deletes the given keys.
    async fn invalidate(&self, keys: &[String]);

    /// Applies a committed change of `delta` spots on `event_id`.
    ///
    /// The per-event snapshot and the listing are dropped so the next read
    /// repopulates them from the store. A zero delta leaves both untouched.
    async fn patch_event_spots(&self, event_id: EventId, delta: i32);
}

/// Typed read-through on top of [`CacheCoordinatorInterface`].
#[async_trait]
pub trait CoordinatorExt: CacheCoordinatorInterface {
    /// Serves `key` from the cache, or loads it with `loader` and caches it.
    ///
    /// Only loader errors are returned.
    async fn read_through<T, F, Fut>(&self, key: &str, loader: F) -> SeatbookResult<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = SeatbookResult<T>> + Send,
    {
        if let Some(json) = self.lookup(key).await {
            match serde_json::from_str::<T>(&json) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("Discarding unreadable snapshot '{}': {}", key, e);
                    self.invalidate(&[key.to_string()]).await;
                }
            }
        }

        let value = loader().await?;

        match serde_json::to_string(&value) {
            Ok(json) => self.populate(key, &json).await,
            Err(e) => warn!("Failed to serialize snapshot '{}': {}", key, e),
        }

        Ok(value)
    }
}

impl<T: CacheCoordinatorInterface + ?Sized> CoordinatorExt for T {}

/// Coordinator over an injected cache port.
#[derive(Component)]
#[shaku(interface = CacheCoordinatorInterface)]
pub struct CacheCoordinator {
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
    #[shaku(default = DEFAULT_OPERATION_TIMEOUT)]
    operation_timeout: Duration,
}

impl CacheCoordinator {
    /// Creates a coordinator with explicit TTL and timeout.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, ttl: Duration, operation_timeout: Duration) -> Self {
        Self {
            cache,
            ttl,
            operation_timeout,
        }
    }

    /// Creates a coordinator with the default TTL and timeout.
    #[must_use]
    pub fn with_defaults(cache: Arc<dyn CacheInterface>) -> Self {
        Self::new(cache, DEFAULT_TTL, DEFAULT_OPERATION_TIMEOUT)
    }

    /// Runs one cache call under the operation timeout.
    async fn bounded<T>(
        &self,
        key: &str,
        op: impl Future<Output = SeatbookResult<T>> + Send,
    ) -> SeatbookResult<T> {
        match tokio::time::timeout(self.operation_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(SeatbookError::Timeout(format!(
                "cache operation on '{}' exceeded {:?}",
                key, self.operation_timeout
            ))),
        }
    }

    async fn drop_key(&self, key: &str) {
        if let Err(e) = self.bounded(key, self.cache.delete(key)).await {
            warn!("Failed to delete cache key '{}': {}", key, e);
        }
    }
}

#[async_trait]
impl CacheCoordinatorInterface for CacheCoordinator {
    async fn lookup(&self, key: &str) -> Option<String> {
        match self.bounded(key, self.cache.get_raw(key)).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Cache lookup for '{}' failed, reading from store: {}", key, e);
                None
            }
        }
    }

    async fn populate(&self, key: &str, json: &str) {
        if let Err(e) = self.bounded(key, self.cache.set_raw(key, json, self.ttl)).await {
            warn!("Failed to populate cache key '{}': {}", key, e);
        }
    }

    async fn invalidate(&self, keys: &[String]) {
        for key in keys {
            self.drop_key(key).await;
        }
        debug!("Invalidated cache keys {:?}", keys);
    }

    async fn patch_event_spots(&self, event_id: EventId, delta: i32) {
        if delta == 0 {
            return;
        }
        debug!("Event {} moved by {} spots", event_id, delta);
        self.invalidate(&cache_keys::event_keys(event_id)).await;
    }
}

impl std::fmt::Debug for CacheCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheCoordinator")
            .field("ttl", &self.ttl)
            .field("operation_timeout", &self.operation_timeout)
            .finish_non_exhaustive()
    }
}
