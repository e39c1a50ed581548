//! MySQL repository implementations.

mod event_repository;
mod registration_repository;
mod rows;
mod unit_of_work;

pub use event_repository::MySqlEventRepository;
pub use registration_repository::MySqlRegistrationRepository;
pub use unit_of_work::{MySqlStoreTransaction, MySqlUnitOfWork};
