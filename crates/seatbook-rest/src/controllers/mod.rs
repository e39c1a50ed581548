//! REST API controllers.

pub mod admin_controller;
pub mod event_controller;
pub mod health_controller;
pub mod registration_controller;

pub use health_controller::*;

use crate::responses::AppError;
use seatbook_core::{EventId, RegistrationId, SeatbookError};

/// Parses an event ID from a path segment.
fn parse_event_id(id: &str) -> Result<EventId, AppError> {
    EventId::parse(id)
        .map_err(|_| AppError(SeatbookError::validation(format!("Invalid event ID: {}", id))))
}

/// Parses a registration ID from a path segment.
fn parse_registration_id(id: &str) -> Result<RegistrationId, AppError> {
    RegistrationId::parse(id).map_err(|_| {
        AppError(SeatbookError::validation(format!(
            "Invalid registration ID: {}",
            id
        )))
    })
}
