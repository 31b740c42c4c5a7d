//! Route definitions for the EventHub HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(registration_routes())
        .merge(event_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Seat registration for the calling user.
fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{id}/register",
            post(handlers::registration::register),
        )
        .route("/events/{id}/cancel", delete(handlers::registration::cancel))
        .route(
            "/events/user/me",
            get(handlers::registration::my_registrations),
        )
}

/// Event lookup.
fn event_routes() -> Router<AppState> {
    Router::new().route("/events/{id}", get(handlers::event::get_event))
}

/// Liveness and store reachability.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
