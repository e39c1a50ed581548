//! Admin controller: registration decisions and read models.

use super::{parse_event_id, parse_registration_id};
use crate::{
    extractors::{AdminUser, ValidatedJsonOrDefault},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Router,
};
use seatbook_core::Decision;
use seatbook_service::{
    DecisionRequest, EventRegistrationStatsResponse, RegistrationResponse, StatsResponse,
};
use tracing::debug;

/// Creates the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registrations/:id/:action", put(decide_registration))
        .route("/stats", get(stats))
        .route("/events/registration-stats", get(registration_stats))
        .route("/events/:id/registrations", get(event_registrations))
}

/// Approve or reject a pending registration.
async fn decide_registration(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((id, action)): Path<(String, String)>,
    ValidatedJsonOrDefault(request): ValidatedJsonOrDefault<DecisionRequest>,
) -> ApiResult<RegistrationResponse> {
    debug!("Decision request: {} on {}", action, id);

    let registration_id = parse_registration_id(&id)?;
    let decision: Decision = action.parse()?;

    let registration = state
        .registration_service
        .decide(registration_id, decision, admin.user_id, request.reason)
        .await?;
    ok(registration)
}

/// System-wide totals.
async fn stats(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<StatsResponse> {
    debug!("Stats request");

    let stats = state.admin_service.stats().await?;
    ok(stats)
}

/// All registrations of one event.
async fn event_registrations(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Vec<RegistrationResponse>> {
    debug!("Event registrations request: {}", id);

    let event_id = parse_event_id(&id)?;
    let registrations = state.admin_service.event_registrations(event_id).await?;
    ok(registrations)
}

/// Per-event capacity and registration counts.
async fn registration_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Vec<EventRegistrationStatsResponse>> {
    debug!("Registration stats request");

    let stats = state.admin_service.registration_stats().await?;
    ok(stats)
}
