//! # Seatbook Server Library
//!
//! Dependency injection wiring and startup helpers for the Seatbook binary.

pub mod di;
pub mod startup;
