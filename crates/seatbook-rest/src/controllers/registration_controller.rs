//! Registration controller.

use super::parse_registration_id;
use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{created, ok, ok_empty, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use seatbook_service::{
    CreateRegistrationRequest, RegistrationResponse, RegistrationWithEventResponse,
};
use tracing::debug;

/// Creates the registration router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_registrations).post(register))
        .route("/:id", delete(cancel_registration))
}

/// Register the caller for an event.
async fn register(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateRegistrationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationResponse>>), AppError> {
    debug!("Register request: event {}", request.event_id);

    let registration = state
        .registration_service
        .register(user.user_id, request)
        .await?;
    Ok(created(registration))
}

/// List the caller's registrations with their events.
async fn my_registrations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<RegistrationWithEventResponse>> {
    debug!("My registrations request");

    let registrations = state
        .registration_service
        .my_registrations(user.user_id)
        .await?;
    ok(registrations)
}

/// Cancel one of the caller's pending registrations.
async fn cancel_registration(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    debug!("Cancel registration request: {}", id);

    let registration_id = parse_registration_id(&id)?;
    state
        .registration_service
        .cancel(registration_id, user.user_id)
        .await?;
    ok_empty()
}
