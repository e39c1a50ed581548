//! # Seatbook Service
//!
//! Business logic for Seatbook: the registration state machine, the
//! capacity ledger, event management, admin read models, and the cache
//! coordinator that keeps cached snapshots in step with the store.

pub mod admin_service;
pub mod cache;
pub mod dto;
pub mod event_service;
pub mod r#impl;
pub mod ledger;
pub mod mappers;
pub mod registration_service;

pub use admin_service::*;
pub use cache::*;
pub use dto::*;
pub use event_service::*;
pub use ledger::*;
pub use r#impl::*;
pub use registration_service::*;
