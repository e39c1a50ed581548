//! Service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `event_service.rs`).

pub mod admin_service_impl;
pub mod event_service_impl;
pub mod registration_service_impl;

pub use admin_service_impl::AdminServiceComponent;
pub use event_service_impl::EventServiceComponent;
pub use registration_service_impl::RegistrationServiceComponent;
