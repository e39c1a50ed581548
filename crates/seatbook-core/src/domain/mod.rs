//! Domain entities and value objects for Seatbook.
//!
//! This module contains the core business concepts of the application:
//! events with a finite number of seats, and the registrations that claim them.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
