//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{events, health, mint, scan, session};
use crate::state::AppState;

/// Create the API router (health routes are separate so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/scan", get(scan::scan))
        .route("/mint", post(mint::mint))
        .route("/session", post(session::create_session))
        .route("/session/challenge", post(session::create_challenge))
        .route("/events", get(events::list_events))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
