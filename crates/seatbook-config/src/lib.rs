//! # Seatbook Config
//!
//! Configuration management for Seatbook.
//! Supports layered configuration from TOML files and environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
