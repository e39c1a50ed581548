//! Domain value objects.

mod registration_status;
mod role;

pub use registration_status::*;
pub use role::*;
