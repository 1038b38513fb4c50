//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use std::future::Future;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use likemint_core::RepoResult;
use likemint_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();
    let deadline = ctx.ready_timeout();

    let db_healthy = match ctx.events() {
        Ok(store) => probe(deadline, store.ping()).await,
        Err(_) => false,
    };
    let (feed_healthy, chain_healthy) = tokio::join!(
        probe(deadline, ctx.feed().ready()),
        probe(deadline, ctx.boundaries().ready()),
    );

    let response = ReadinessResponse::ready(db_healthy, feed_healthy, chain_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

async fn probe(deadline: Duration, check: impl Future<Output = RepoResult<()>>) -> bool {
    matches!(tokio::time::timeout(deadline, check).await, Ok(Ok(())))
}
