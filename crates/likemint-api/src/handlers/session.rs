use axum::extract::State;
use likemint_service::dto::{ChallengeRequest, ChallengeResponse, SessionRequest, SessionResponse};
use likemint_service::SessionService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Issue a one-time message for the wallet to sign
///
/// POST /session/challenge
pub async fn create_challenge(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChallengeRequest>,
) -> ApiResult<ApiJson<ChallengeResponse>> {
    let service = SessionService::new(state.service_context());
    let response = service.challenge(request).await?;
    Ok(ApiJson(response))
}

/// Sign in with a wallet signature over an issued challenge
///
/// POST /session
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SessionRequest>,
) -> ApiResult<ApiJson<SessionResponse>> {
    let service = SessionService::new(state.service_context());
    let response = service.create_session(request).await?;
    Ok(ApiJson(response))
}
