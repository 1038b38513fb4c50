//! Signer route handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use likemint_core::AttestationRequest;
use likemint_service::dto::{AttestResponse, HealthResponse, SignerInfoResponse};
use likemint_service::MintService;
use tracing::{info, instrument};

use crate::error::SignerError;
use crate::state::SignerState;

/// Recompute and sign the mint arguments for one (target, reactor) pair
///
/// POST /attest
#[instrument(skip_all)]
pub async fn attest(
    State(state): State<SignerState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    body: Result<Json<AttestationRequest>, JsonRejection>,
) -> Result<Json<AttestResponse>, SignerError> {
    match bearer {
        Some(TypedHeader(Authorization(bearer))) if state.accepts(bearer.token()) => {}
        _ => return Err(SignerError::Unauthorized),
    }
    let Json(request) = body.map_err(|e| SignerError::InvalidBody(e.body_text()))?;

    let arguments = MintService::new(state.service_context())
        .prepare_arguments(&request)
        .await?;
    let signature = state.key().sign_mint(&arguments)?;

    info!(
        target = %request.target_id,
        reactor = %request.reactor_id,
        total = arguments.total(),
        "attested mint arguments"
    );

    Ok(Json(AttestResponse {
        arguments,
        signature,
    }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Address signatures from this service recover to
///
/// GET /address
pub async fn address(State(state): State<SignerState>) -> Json<SignerInfoResponse> {
    Json(SignerInfoResponse {
        address: state.key().address(),
    })
}
