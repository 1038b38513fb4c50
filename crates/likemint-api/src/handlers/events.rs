use axum::extract::State;
use likemint_core::ChainEvent;
use likemint_service::dto::EventsQuery;
use likemint_service::EventService;

use crate::extractors::ValidatedQuery;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Mirrored Mint / Claim events received by a wallet, newest first
///
/// GET /events?address=<wallet>&limit=N
pub async fn list_events(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<EventsQuery>,
) -> ApiResult<ApiJson<Vec<ChainEvent>>> {
    let service = EventService::new(state.service_context());
    let events = service.list(&query.address, query.limit).await?;
    Ok(ApiJson(events))
}
