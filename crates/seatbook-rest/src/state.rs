//! Application state for Axum handlers.

use seatbook_repository::DatabasePoolInterface;
use seatbook_service::{AdminService, CacheInterface, EventService, RegistrationService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub event_service: Arc<dyn EventService>,
    pub registration_service: Arc<dyn RegistrationService>,
    pub admin_service: Arc<dyn AdminService>,
    pub database: Arc<dyn DatabasePoolInterface>,
    pub cache: Arc<dyn CacheInterface>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        event_service: Arc<dyn EventService>,
        registration_service: Arc<dyn RegistrationService>,
        admin_service: Arc<dyn AdminService>,
        database: Arc<dyn DatabasePoolInterface>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            event_service,
            registration_service,
            admin_service,
            database,
            cache,
        }
    }

    /// Resolves every handler dependency from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn EventService>
            + HasComponent<dyn RegistrationService>
            + HasComponent<dyn AdminService>
            + HasComponent<dyn DatabasePoolInterface>
            + HasComponent<dyn CacheInterface>,
    {
        Self::new(
            HasComponent::<dyn EventService>::resolve(module),
            HasComponent::<dyn RegistrationService>::resolve(module),
            HasComponent::<dyn AdminService>::resolve(module),
            HasComponent::<dyn DatabasePoolInterface>::resolve(module),
            HasComponent::<dyn CacheInterface>::resolve(module),
        )
    }
}
