//! # Seatbook Core
//!
//! Core types, domain entities, and error definitions for Seatbook.
//! This crate provides the foundational abstractions used across all layers
//! of the service: the error taxonomy, typed identifiers, and the Event and
//! Registration entities with their state rules.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
