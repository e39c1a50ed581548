//! # Seatbook Repository
//!
//! Durable storage for events and registrations.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn EventRepository> / Arc<dyn RegistrationRepository> / Arc<dyn UnitOfWork>
//! MySql*Repository, MySqlUnitOfWork     (SQLx)
//!   ↓
//! MySQL
//! ```
//!
//! [`InMemoryStore`] implements the same traits without a database and is
//! used by the service tests and the `memory` store profile.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::{InMemoryStore, InMemoryTransaction};
pub use mysql::*;
pub use pool::*;
pub use traits::*;
