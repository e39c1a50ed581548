//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Seatbook.
///
/// Domain variants map to 4xx responses with a stable error code.
/// `StoreUnavailable` is fatal to a request and surfaces as 5xx.
/// `CacheUnavailable` is produced by cache backends and is always
/// absorbed by the cache coordinator before it can reach a caller.
#[derive(Error, Debug)]
pub enum SeatbookError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// A registration for the same user and event already exists
    #[error("Duplicate registration: {0}")]
    DuplicateRegistration(String),

    /// A registration is no longer pending
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// No spots left on the event
    #[error("Capacity exhausted for event {event_id}")]
    CapacityExhausted { event_id: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Business rule violation
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    // ============ Authentication/Authorization Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden access (ownership or role mismatch)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    // ============ Infrastructure Errors ============
    /// Durable store error
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Cache backend error
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeatbookError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::DuplicateRegistration(_)
            | Self::InvalidTransition(_)
            | Self::CapacityExhausted { .. }
            | Self::Validation(_)
            | Self::BusinessRule(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_) | Self::InvalidToken(_) | Self::TokenExpired => 401,
            Self::Forbidden(_) => 403,
            Self::StoreUnavailable(_) | Self::CacheUnavailable(_) | Self::Timeout(_) => 503,
            Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { resource_type, .. } => match *resource_type {
                "Event" => "EVENT_NOT_FOUND",
                "Registration" => "REGISTRATION_NOT_FOUND",
                _ => "NOT_FOUND",
            },
            Self::DuplicateRegistration(_) => "DUPLICATE_REGISTRATION",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::CapacityExhausted { .. } => "CAPACITY_EXHAUSTED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a capacity exhausted error for an event.
    #[must_use]
    pub fn capacity_exhausted<T: ToString>(event_id: T) -> Self {
        Self::CapacityExhausted {
            event_id: event_id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this is a caller-facing domain error (4xx).
    #[must_use]
    pub const fn is_domain_error(&self) -> bool {
        let status = self.status_code();
        status >= 400 && status < 500
    }

    /// Checks if the failure comes from an unreachable backend.
    ///
    /// Business logic never retries these; the deployment layer may.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::CacheUnavailable(_) | Self::Timeout(_)
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for SeatbookError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(db_err.message().to_string())
            }
            sqlx::Error::RowNotFound => Self::Internal("Expected row was not found".to_string()),
            _ => Self::StoreUnavailable(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for SeatbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `SeatbookError`.
    #[must_use]
    pub fn from_error(error: &SeatbookError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&SeatbookError> for ErrorResponse {
    fn from(error: &SeatbookError) -> Self {
        Self::from_error(error)
    }
}
