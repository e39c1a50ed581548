//! Data Transfer Objects (DTOs).

mod admin_dto;
mod event_dto;
mod registration_dto;

pub use admin_dto::*;
pub use event_dto::*;
pub use registration_dto::*;
