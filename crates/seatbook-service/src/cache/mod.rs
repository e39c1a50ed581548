//! Caching infrastructure for the service layer.
//!
//! The cache port has a Redis and an in-process implementation. Services
//! never talk to it directly; they go through the [`CacheCoordinator`],
//! which makes every cache operation best effort.

mod cache_interface;
pub mod cache_keys;
mod coordinator;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use coordinator::{
    CacheCoordinator, CacheCoordinatorInterface, CacheCoordinatorParameters, CoordinatorExt,
    DEFAULT_OPERATION_TIMEOUT, DEFAULT_TTL,
};
pub use memory_cache::{CacheEntries, InMemoryCacheService};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
