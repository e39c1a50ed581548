//! Health check controller.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::warn;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Readiness response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// `ready` when the store answers.
    pub status: &'static str,
    /// Store round trip outcome.
    pub store: &'static str,
    /// Cache round trip outcome. The cache is advisory and never blocks
    /// readiness.
    pub cache: &'static str,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let store = match state.database.health_check().await {
        Ok(()) => "up",
        Err(e) => {
            warn!("Readiness: store check failed: {}", e);
            "down"
        }
    };

    let cache = if !state.cache.is_enabled() {
        "disabled"
    } else if let Err(e) = state.cache.ping().await {
        warn!("Readiness: cache check failed: {}", e);
        "down"
    } else {
        "up"
    };

    let (status, code) = if store == "up" {
        ("ready", StatusCode::OK)
    } else {
        ("not_ready", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(ReadinessResponse {
            status,
            store,
            cache,
        }),
    )
}

/// Liveness check endpoint.
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
