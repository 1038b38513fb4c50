use axum::extract::State;
use likemint_service::dto::{MintRequest, MintResponse};
use likemint_service::MintService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Build and attest mint arguments for one reactor of the signed-in account
///
/// POST /mint
pub async fn mint(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<MintRequest>,
) -> ApiResult<ApiJson<MintResponse>> {
    let service = MintService::new(state.service_context());
    let response = service
        .mint(user.account_id, user.address, request.reactor_id)
        .await?;
    Ok(ApiJson(response))
}
