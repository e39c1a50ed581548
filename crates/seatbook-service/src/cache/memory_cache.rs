//! In-process cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::RwLock;
use seatbook_core::{SeatbookError, SeatbookResult};
use shaku::Component;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Shared entry table of an [`InMemoryCacheService`].
#[derive(Clone, Default)]
pub struct CacheEntries(Arc<RwLock<HashMap<String, Entry>>>);

/// Process-local cache with per-entry expiry.
///
/// Expired entries are dropped lazily on read. Cloning yields another
/// handle to the same entries.
#[derive(Component, Clone, Default)]
#[shaku(interface = CacheInterface)]
pub struct InMemoryCacheService {
    entries: CacheEntries,
    offline: Arc<AtomicBool>,
}

impl InMemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a backend outage: every call fails with `CacheUnavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .0
            .read()
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    /// Checks if no live entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> SeatbookResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(SeatbookError::CacheUnavailable(
                "in-memory cache is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> SeatbookResult<Option<String>> {
        self.check_online()?;

        let now = Instant::now();
        let value = {
            let entries = self.entries.0.read();
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
                Some(_) => None,
                None => return Ok(None),
            }
        };

        if value.is_none() {
            debug!("Cache entry '{}' expired", key);
            self.entries.0.write().remove(key);
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> SeatbookResult<()> {
        self.check_online()?;

        self.entries.0.write().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> SeatbookResult<bool> {
        self.check_online()?;
        Ok(self.entries.0.write().remove(key).is_some())
    }

    async fn ping(&self) -> SeatbookResult<()> {
        self.check_online()
    }
}

impl std::fmt::Debug for InMemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheService")
            .field("entries", &self.entries.0.read().len())
            .finish()
    }
}
