//! Dependency injection module using Shaku.
//!
//! `SeatbookModule` wires the whole service into one process: the MySQL
//! pool and repositories, the cache port and its coordinator, the capacity
//! ledger, the three services, and the token provider.

use deadpool_redis::Pool;
use seatbook_config::{AppConfig, CacheBackend};
use seatbook_core::SeatbookResult;
use seatbook_repository::{
    DatabasePool, DatabasePoolInterface, MySqlEventRepository, MySqlRegistrationRepository,
    MySqlUnitOfWork,
};
use seatbook_security::TokenProvider;
use seatbook_service::{
    AdminServiceComponent, CacheCoordinator, CacheCoordinatorParameters, CacheInterface,
    CapacityLedger, EventServiceComponent, InMemoryCacheService, RedisCacheService,
    RegistrationServiceComponent,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// Single-process deployment.
// The cache slot holds a Redis service; the memory backend overrides it.
module! {
    pub SeatbookModule {
        components = [
            DatabasePool,
            MySqlEventRepository,
            MySqlRegistrationRepository,
            MySqlUnitOfWork,
            RedisCacheService,
            CacheCoordinator,
            CapacityLedger,
            EventServiceComponent,
            RegistrationServiceComponent,
            AdminServiceComponent,
            TokenProvider,
        ],
        providers = [],
    }
}

/// The built module plus the handles that must be closed on shutdown.
pub struct AppResources {
    pub module: Arc<SeatbookModule>,
    redis_pool: Option<Arc<Pool>>,
}

impl AppResources {
    /// Closes the cache connections and the database pool.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.redis_pool {
            pool.close();
            info!("Redis cache pool closed");
        }

        let database: Arc<dyn DatabasePoolInterface> = self.module.resolve();
        database.close().await;
    }
}

/// Connects the store, selects the cache backend, and builds the module.
pub async fn build_module(config: &AppConfig) -> SeatbookResult<AppResources> {
    let db_pool = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let (cache, redis_pool) = match config.cache.backend {
        CacheBackend::Redis if config.redis.enabled => {
            let pool = RedisCacheService::create_pool(&config.redis)?;
            (RedisCacheService::new(pool.clone()), Some(pool))
        }
        CacheBackend::Redis | CacheBackend::Memory | CacheBackend::Disabled => {
            (RedisCacheService::disabled(), None)
        }
    };

    info!(
        "Cache backend: {} (ttl {}s, timeout {}ms)",
        effective_backend(config),
        config.cache.default_ttl_secs,
        config.cache.operation_timeout_ms
    );

    let mut builder = SeatbookModule::builder()
        .with_component_parameters::<DatabasePool>(db_pool.into_parameters())
        .with_component_parameters::<RedisCacheService>(cache.into_parameters())
        .with_component_parameters::<CacheCoordinator>(CacheCoordinatorParameters {
            ttl: config.cache.default_ttl(),
            operation_timeout: config.cache.operation_timeout(),
        })
        .with_component_parameters::<TokenProvider>(TokenProvider::parameters(Arc::new(
            config.security.clone(),
        )));

    if config.cache.backend == CacheBackend::Memory {
        builder = builder
            .with_component_override::<dyn CacheInterface>(Box::new(InMemoryCacheService::new()));
    }

    Ok(AppResources {
        module: Arc::new(builder.build()),
        redis_pool,
    })
}

/// The backend actually serving lookups once `redis.enabled` is applied.
#[must_use]
pub fn effective_backend(config: &AppConfig) -> CacheBackend {
    match config.cache.backend {
        CacheBackend::Redis if !config.redis.enabled => CacheBackend::Disabled,
        backend => backend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_backend() {
        let mut config = AppConfig::default();
        assert_eq!(effective_backend(&config), CacheBackend::Redis);

        config.redis.enabled = false;
        assert_eq!(effective_backend(&config), CacheBackend::Disabled);

        config.cache.backend = CacheBackend::Memory;
        assert_eq!(effective_backend(&config), CacheBackend::Memory);
    }
}
