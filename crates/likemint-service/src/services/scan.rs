//! Scan service - `GET /scan`

use std::collections::HashMap;

use tracing::{info, instrument};

use likemint_core::{Address, DomainError, Identity, ScanResult};

use crate::dto::ScanResponse;

use super::aggregator::{ReactionAggregator, ScanLimits};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::readiness::ensure_ready;

/// Scan service
pub struct ScanService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScanService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Tally the reactions received by the account behind `address`
    #[instrument(skip(self), fields(address = %address))]
    pub async fn scan(&self, address: &Address, limit: Option<usize>) -> ServiceResult<ScanResponse> {
        let identity = resolve_verified(self.ctx, address).await?;

        let mut limits = ScanLimits::from(self.ctx.scan_config());
        if let Some(limit) = limit {
            limits.max_results = limit;
        }

        let scan = self.scan_with_boundaries(&identity, limits).await?;
        info!(target = %identity.id, reactors = scan.count(), "scan complete");

        Ok(ScanResponse::from(&scan))
    }

    /// Run the aggregator, then attach every reactor's last-mint boundary
    async fn scan_with_boundaries(
        &self,
        identity: &Identity,
        limits: ScanLimits,
    ) -> ServiceResult<ScanResult> {
        ensure_ready(self.ctx).await?;

        let scan = ReactionAggregator::new(self.ctx.feed())
            .scan(identity.id, limits, None)
            .await?;
        if scan.is_empty() {
            return Ok(scan);
        }

        let reactors = scan.reactor_ids().to_vec();
        let targets = vec![identity.id; reactors.len()];
        let closes = self
            .ctx
            .boundaries()
            .range_close_batch(&targets, &reactors)
            .await?;

        let boundaries: HashMap<_, _> = reactors.into_iter().zip(closes).collect();
        Ok(scan.with_boundaries(boundaries))
    }
}

/// Resolve `address` and require it to be verified for its account
pub(crate) async fn resolve_verified(
    ctx: &ServiceContext,
    address: &Address,
) -> ServiceResult<Identity> {
    let identity = ctx.identity().resolve_by_address(address).await?;
    if !identity.is_verified(address) {
        return Err(DomainError::Unverified {
            address: *address,
            account_id: identity.id,
        }
        .into());
    }
    Ok(identity)
}
