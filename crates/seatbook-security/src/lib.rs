//! # Seatbook Security
//!
//! Bearer token validation and role checks for Seatbook.
//! Tokens are issued by an external identity provider sharing the HS256
//! secret; this crate only mints tokens for tests and local tooling.

pub mod jwt;
pub mod rbac;

pub use jwt::*;
pub use rbac::*;
