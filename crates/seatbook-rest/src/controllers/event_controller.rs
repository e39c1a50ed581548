//! Event controller.

use super::parse_event_id;
use crate::{
    extractors::{AdminUser, ValidatedJson},
    responses::{created, ok, ok_empty, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use seatbook_service::{CreateEventRequest, EventResponse, UpdateEventRequest};
use tracing::debug;

/// Creates the event router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
}

/// List all events (public).
async fn list_events(State(state): State<AppState>) -> ApiResult<Vec<EventResponse>> {
    debug!("List events request");

    let events = state.event_service.list_events().await?;
    ok(events)
}

/// Get an event by ID (public).
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EventResponse> {
    debug!("Get event request: {}", id);

    let event_id = parse_event_id(&id)?;
    let event = state.event_service.get_event(event_id).await?;
    ok(event)
}

/// Create an event (admin only).
async fn create_event(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EventResponse>>), AppError> {
    debug!("Create event request: {}", request.title);

    let event = state
        .event_service
        .create_event(admin.user_id, request)
        .await?;
    Ok(created(event))
}

/// Update an event's details or capacity (admin only).
async fn update_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<EventResponse> {
    debug!("Update event request: {}", id);

    let event_id = parse_event_id(&id)?;
    let event = state.event_service.update_event(event_id, request).await?;
    ok(event)
}

/// Delete an event and its registrations (admin only).
async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    debug!("Delete event request: {}", id);

    let event_id = parse_event_id(&id)?;
    state.event_service.delete_event(event_id).await?;
    ok_empty()
}
