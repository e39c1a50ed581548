//! Validated JSON extractors for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes a JSON body and validates it with the
//! `validator` crate. `ValidatedJsonOrDefault<T>` does the same but treats
//! an empty body as `T::default()`. Both answer failures with a 400 envelope
//! carrying field-level details.

use crate::responses::error_body;
use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use seatbook_core::{ErrorResponse, FieldError};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// JSON extractor that automatically validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use seatbook_rest::extractors::ValidatedJson;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct RenameRequest {
///     #[validate(length(min = 1, max = 200))]
///     title: String,
/// }
///
/// async fn rename(ValidatedJson(request): ValidatedJson<RenameRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Like [`ValidatedJson`], but an empty body yields `T::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJsonOrDefault<T>(pub T);

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(String),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl From<JsonRejection> for ValidatedJsonRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self::JsonError(rejection.body_text())
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let error_response = match self {
            Self::JsonError(message) => ErrorResponse {
                code: "INVALID_JSON".to_string(),
                message: format!("Invalid JSON: {}", message),
                details: None,
            },
            Self::ValidationError(errors) => ErrorResponse {
                code: "VALIDATION_ERROR".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(convert_validation_errors(&errors)),
            },
        };
        error_body(StatusCode::BAD_REQUEST, error_response)
    }
}

/// Convert validator errors to field errors.
fn convert_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors = Vec::new();

    for (field, field_errs) in errors.field_errors() {
        for err in field_errs {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Validation failed for field '{}'", field));

            field_errors.push(FieldError {
                field: field.to_string(),
                message,
                code: err.code.to_string(),
            });
        }
    }

    for (field, errors_kind) in &errors.0 {
        if let ValidationErrorsKind::Struct(nested) = errors_kind {
            for nested_err in convert_validation_errors(nested.as_ref()) {
                field_errors.push(FieldError {
                    field: format!("{}.{}", field, nested_err.field),
                    message: nested_err.message,
                    code: nested_err.code,
                });
            }
        }
    }

    field_errors
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJsonOrDefault<T>
where
    T: DeserializeOwned + Validate + Default,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ValidatedJsonRejection::JsonError(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let value: T = serde_json::from_slice(&bytes)
            .map_err(|e| ValidatedJsonRejection::JsonError(e.to_string()))?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct VenueRequest {
        #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
        name: String,
        #[validate(range(min = 1, message = "Seats must be positive"))]
        seats: i32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct NestedRequest {
        #[validate(length(min = 1))]
        title: String,
        #[validate(nested)]
        venue: VenueRequest,
    }

    #[test]
    fn test_convert_validation_errors_single_field() {
        let req = VenueRequest {
            name: "ab".to_string(),
            seats: 10,
        };

        let errors = req.validate().unwrap_err();
        let field_errors = convert_validation_errors(&errors);

        assert_eq!(field_errors.len(), 1);
        assert_eq!(field_errors[0].field, "name");
        assert_eq!(field_errors[0].message, "Name must be at least 3 characters");
    }

    #[test]
    fn test_convert_validation_errors_multiple_fields() {
        let req = VenueRequest {
            name: "ab".to_string(),
            seats: 0,
        };

        let errors = req.validate().unwrap_err();
        let field_errors = convert_validation_errors(&errors);

        assert_eq!(field_errors.len(), 2);
        let field_names: Vec<&str> = field_errors.iter().map(|e| e.field.as_str()).collect();
        assert!(field_names.contains(&"name"));
        assert!(field_names.contains(&"seats"));
    }

    #[test]
    fn test_convert_validation_errors_nested() {
        let req = NestedRequest {
            title: "Valid Title".to_string(),
            venue: VenueRequest {
                name: "ab".to_string(),
                seats: 5,
            },
        };

        let errors = req.validate().unwrap_err();
        let field_errors = convert_validation_errors(&errors);

        assert_eq!(field_errors.len(), 1);
        assert_eq!(field_errors[0].field, "venue.name");
    }
}
