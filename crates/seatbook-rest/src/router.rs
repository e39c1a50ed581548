//! Main application router.

use crate::{
    controllers::{admin_controller, event_controller, health_controller, registration_controller},
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    responses::error_body,
    state::AppState,
};
use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderValue, StatusCode},
    middleware,
    response::Response,
    routing::get,
    BoxError, Router,
};
use seatbook_config::ServerConfig;
use seatbook_core::{ErrorResponse, SeatbookError};
use seatbook_repository::DatabasePoolInterface;
use seatbook_security::TokenProviderInterface;
use seatbook_service::{AdminService, CacheInterface, EventService, RegistrationService};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use std::time::Duration;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the main application router from a Shaku module.
///
/// The module must provide the three services, the database pool, the cache
/// port, and the token provider.
pub fn create_router<M>(module: &M, server_config: &ServerConfig) -> Router
where
    M: Module
        + HasComponent<dyn EventService>
        + HasComponent<dyn RegistrationService>
        + HasComponent<dyn AdminService>
        + HasComponent<dyn DatabasePoolInterface>
        + HasComponent<dyn CacheInterface>
        + HasComponent<dyn TokenProviderInterface>,
{
    let token_provider = HasComponent::<dyn TokenProviderInterface>::resolve(module);
    build_router(AppState::from_module(module), token_provider, server_config)
}

/// Creates the router over explicit dependencies.
pub fn build_router(
    state: AppState,
    token_provider: Arc<dyn TokenProviderInterface>,
    server_config: &ServerConfig,
) -> Router {
    let cors = create_cors_layer(server_config);
    let auth_state = AuthMiddlewareState::new(token_provider);

    let api_router = Router::new()
        .nest("/events", event_controller::router())
        .nest("/registrations", registration_controller::router())
        .nest("/admin", admin_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let router = Router::new()
        // Health endpoints (no auth required)
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .route("/", get(root))
        .with_state(state);

    let router = with_request_timeout(router, server_config.request_timeout())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under /api/v1");
    router
}

/// Bounds every request by `timeout`; expiry answers 408 in the error envelope.
pub fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        let timeout = SeatbookError::Timeout("request took too long".to_string());
        warn!("{}", timeout);
        return error_body(
            StatusCode::REQUEST_TIMEOUT,
            ErrorResponse::from_error(&timeout),
        );
    }

    let internal = SeatbookError::Internal(err.to_string());
    error_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::from_error(&internal),
    )
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Seatbook API v1"
}
