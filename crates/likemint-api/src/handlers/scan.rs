use axum::extract::State;
use likemint_service::dto::{ScanQuery, ScanResponse};
use likemint_service::ScanService;

use crate::extractors::ValidatedQuery;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Tally reactions for the account linked to a wallet
///
/// GET /scan?address=<wallet>&limit=N
pub async fn scan(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ScanQuery>,
) -> ApiResult<ApiJson<ScanResponse>> {
    let service = ScanService::new(state.service_context());
    let response = service.scan(&query.address, query.limit).await?;
    Ok(ApiJson(response))
}
