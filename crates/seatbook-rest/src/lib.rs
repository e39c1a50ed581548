//! # Seatbook REST
//!
//! HTTP surface of Seatbook built on Axum: public event reads, caller
//! registrations, and the admin decision and reporting endpoints. Every
//! response uses the `{success, data?, error?}` envelope.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
