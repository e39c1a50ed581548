//! Domain entities.

mod event;
mod registration;

pub use event::*;
pub use registration::*;
