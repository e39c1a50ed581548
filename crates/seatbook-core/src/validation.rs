//! Validation utilities.

use crate::{FieldError, SeatbookError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `SeatbookError` on failure.
    fn validate_request(&self) -> Result<(), SeatbookError> {
        self.validate().map_err(validation_errors_to_seatbook_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    // HashMap order is unstable
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `SeatbookError`.
#[must_use]
pub fn validation_errors_to_seatbook_error(errors: ValidationErrors) -> SeatbookError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    SeatbookError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Longest accepted event title, in characters.
    pub const MAX_TITLE_CHARS: usize = 200;
    /// Longest accepted event description, in characters.
    pub const MAX_DESCRIPTION_CHARS: usize = 5000;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates an event title: non-blank, at most 200 characters.
    pub fn event_title(value: &str) -> Result<(), ValidationError> {
        not_blank(value)?;
        if value.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::new("title_too_long"));
        }
        Ok(())
    }

    /// Validates an event description length.
    pub fn event_description(value: &str) -> Result<(), ValidationError> {
        if value.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::new("description_too_long"));
        }
        Ok(())
    }

    /// Validates a declared event capacity.
    pub fn positive_capacity(value: i32) -> Result<(), ValidationError> {
        if value <= 0 {
            return Err(ValidationError::new("capacity_must_be_positive"));
        }
        Ok(())
    }
}
