//! Mint service - the per-request mint pipeline
//!
//! One mint request walks
//! `Idle -> IdentityResolved -> Scanned -> WindowFiltered -> ArgumentsBuilt
//! -> Attested -> Complete`; any failure moves it to `Failed`. Nothing is
//! retried. The signer service runs the same pipeline up to
//! `ArgumentsBuilt` through [`MintService::prepare_arguments`].

use std::fmt;

use tracing::{debug, info, instrument, warn};

use likemint_core::{
    AccountId, Address, AttestationRequest, DomainError, MintArguments, ReactorEntry, ScanResult,
};

use crate::dto::MintResponse;

use super::aggregator::{ReactionAggregator, ScanLimits};
use super::attestation::AttestationClient;
use super::builder::MintArgumentBuilder;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::readiness::ensure_ready;
use super::scan::resolve_verified;
use super::window::{Attribution, WindowFilter};

/// Where a mint request currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintStage {
    Idle,
    IdentityResolved,
    Scanned,
    WindowFiltered,
    ArgumentsBuilt,
    Attested,
    Complete,
    Failed(String),
}

impl MintStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed(_))
    }
}

impl fmt::Display for MintStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::IdentityResolved => f.write_str("identity_resolved"),
            Self::Scanned => f.write_str("scanned"),
            Self::WindowFiltered => f.write_str("window_filtered"),
            Self::ArgumentsBuilt => f.write_str("arguments_built"),
            Self::Attested => f.write_str("attested"),
            Self::Complete => f.write_str("complete"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Progress tracker for one mint request
#[derive(Debug)]
pub struct MintRun {
    reactor_id: AccountId,
    stage: MintStage,
}

impl MintRun {
    pub fn new(reactor_id: AccountId) -> Self {
        Self {
            reactor_id,
            stage: MintStage::Idle,
        }
    }

    pub fn stage(&self) -> &MintStage {
        &self.stage
    }

    pub fn advance(&mut self, next: MintStage) {
        debug!(reactor = %self.reactor_id, from = %self.stage, to = %next, "mint stage");
        self.stage = next;
    }

    pub fn fail(&mut self, error: &ServiceError) {
        warn!(
            reactor = %self.reactor_id,
            at = %self.stage,
            code = error.error_code(),
            error = %error,
            "mint failed"
        );
        self.stage = MintStage::Failed(error.to_string());
    }

    /// Record the outcome of a pipeline step
    fn track<T>(&mut self, result: ServiceResult<T>, next: MintStage) -> ServiceResult<T> {
        match result {
            Ok(value) => {
                self.advance(next);
                Ok(value)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }
}

/// Mint service
pub struct MintService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MintService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Produce signed mint arguments for one reactor of the session's account
    #[instrument(skip(self), fields(target = %account_id, reactor = %reactor_id))]
    pub async fn mint(
        &self,
        account_id: AccountId,
        address: Address,
        reactor_id: AccountId,
    ) -> ServiceResult<MintResponse> {
        let request = AttestationRequest {
            reactor_id,
            target_id: account_id,
            target_address: address,
        };
        let mut run = MintRun::new(reactor_id);

        let arguments = self.prepare(&request, &mut run).await?;

        let combined = run.track(
            AttestationClient::new(self.ctx.signers())
                .attest(&request, &arguments)
                .await,
            MintStage::Attested,
        )?;
        run.advance(MintStage::Complete);

        info!(
            count = combined.arguments.total(),
            signatures = combined.signatures.len(),
            "mint arguments attested"
        );

        Ok(MintResponse {
            mint_arguments: combined,
        })
    }

    /// Recompute the mint arguments for `request` from upstream data
    ///
    /// Used locally before attestation and by each signer service.
    #[instrument(skip(self), fields(target = %request.target_id, reactor = %request.reactor_id))]
    pub async fn prepare_arguments(
        &self,
        request: &AttestationRequest,
    ) -> ServiceResult<MintArguments> {
        let mut run = MintRun::new(request.reactor_id);
        self.prepare(request, &mut run).await
    }

    async fn prepare(
        &self,
        request: &AttestationRequest,
        run: &mut MintRun,
    ) -> ServiceResult<MintArguments> {
        let identity = run.track(self.resolve(request).await, MintStage::IdentityResolved)?;

        let scan = run.track(self.scan(identity).await, MintStage::Scanned)?;

        let entry = run.track(
            self.attribute(request, &scan).await,
            MintStage::WindowFiltered,
        )?;

        run.track(
            MintArgumentBuilder::build(request.target_address, request.target_id, &[entry]),
            MintStage::ArgumentsBuilt,
        )
    }

    async fn resolve(&self, request: &AttestationRequest) -> ServiceResult<AccountId> {
        if request.reactor_id.is_zero() {
            return Err(ServiceError::validation("reactorId must be positive"));
        }

        let identity = resolve_verified(self.ctx, &request.target_address).await?;
        if identity.id != request.target_id {
            return Err(DomainError::Unverified {
                address: request.target_address,
                account_id: request.target_id,
            }
            .into());
        }
        Ok(identity.id)
    }

    async fn scan(&self, target_id: AccountId) -> ServiceResult<ScanResult> {
        ensure_ready(self.ctx).await?;
        ReactionAggregator::new(self.ctx.feed())
            .scan(target_id, ScanLimits::from(self.ctx.scan_config()), None)
            .await
    }

    async fn attribute(
        &self,
        request: &AttestationRequest,
        scan: &ScanResult,
    ) -> ServiceResult<ReactorEntry> {
        let tally = scan
            .tally(request.reactor_id)
            .ok_or(DomainError::NothingToMint)?;

        let boundary = self
            .ctx
            .boundaries()
            .range_close(request.target_id, request.reactor_id)
            .await?;

        match WindowFilter::attribute(tally, boundary) {
            Attribution::Attributable(entry) => Ok(entry),
            Attribution::NoAttributableActivity => Err(DomainError::NothingToMint.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        addr, id, like, FakeChain, FakeFeed, FakeIdentity, FakeSigner, SignerBehaviour,
    };
    use likemint_core::traits::Signer;
    use std::sync::Arc;

    fn request(reactor: u64) -> AttestationRequest {
        AttestationRequest {
            reactor_id: id(reactor),
            target_id: id(9),
            target_address: addr(1),
        }
    }

    fn context(chain: FakeChain, signers: Vec<Arc<dyn Signer>>) -> ServiceContext {
        // A liked at 100 and 200, B at 150
        let feed = FakeFeed::with_pages(vec![vec![like(200, &[1]), like(150, &[2]), like(100, &[1])]]);
        let mut builder = ServiceContext::builder()
            .identity(Arc::new(
                FakeIdentity::default()
                    .with(addr(1), id(9), true)
                    .with(addr(2), id(9), false),
            ))
            .feed(Arc::new(feed))
            .boundaries(Arc::new(chain));
        for signer in signers {
            builder = builder.signer(signer);
        }
        builder.build().unwrap()
    }

    fn reference_chain() -> FakeChain {
        FakeChain::default().with_boundary(id(9), id(1), 150)
    }

    #[tokio::test]
    async fn test_prepare_reference_scenario() {
        let ctx = context(reference_chain(), Vec::new());
        let service = MintService::new(&ctx);

        let a = service.prepare_arguments(&request(1)).await.unwrap();
        assert_eq!(a.entries(), vec![ReactorEntry::new(id(1), 1, 200, 200)]);
        assert_eq!(a.target_address(), addr(1));
        assert_eq!(a.target_id(), id(9));

        let b = service.prepare_arguments(&request(2)).await.unwrap();
        assert_eq!(b.entries(), vec![ReactorEntry::new(id(2), 1, 150, 150)]);
    }

    #[tokio::test]
    async fn test_spent_reactor_has_nothing_to_mint() {
        let chain = FakeChain::default().with_boundary(id(9), id(1), 200);
        let ctx = context(chain, Vec::new());
        let err = MintService::new(&ctx)
            .prepare_arguments(&request(1))
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::NothingToMint)));
    }

    #[tokio::test]
    async fn test_unknown_reactor_has_nothing_to_mint() {
        let ctx = context(reference_chain(), Vec::new());
        let err = MintService::new(&ctx)
            .prepare_arguments(&request(77))
            .await
            .unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::NothingToMint)));
    }

    #[tokio::test]
    async fn test_target_mismatch_is_unverified() {
        let ctx = context(reference_chain(), Vec::new());
        let mut req = request(1);
        req.target_id = id(10);
        let err = MintService::new(&ctx).prepare_arguments(&req).await.unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Unverified { .. })));

        let mut req = request(1);
        req.target_address = addr(2);
        let err = MintService::new(&ctx).prepare_arguments(&req).await.unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Unverified { .. })));
    }

    #[tokio::test]
    async fn test_mint_collects_every_signature() {
        let expected = MintArguments::from_entries(
            addr(1),
            id(9),
            &[ReactorEntry::new(id(1), 1, 200, 200)],
        );
        let signers: Vec<Arc<dyn Signer>> = vec![
            FakeSigner::new(0, SignerBehaviour::Echo(expected.clone())),
            FakeSigner::new(1, SignerBehaviour::Echo(expected.clone())),
        ];
        let ctx = context(reference_chain(), signers);

        let response = MintService::new(&ctx)
            .mint(id(9), addr(1), id(1))
            .await
            .unwrap();
        assert_eq!(response.mint_arguments.arguments, expected);
        assert_eq!(response.mint_arguments.signatures.len(), 2);
    }

    #[tokio::test]
    async fn test_mint_fails_when_a_signer_is_down() {
        let expected = MintArguments::from_entries(
            addr(1),
            id(9),
            &[ReactorEntry::new(id(1), 1, 200, 200)],
        );
        let signers: Vec<Arc<dyn Signer>> = vec![
            FakeSigner::new(0, SignerBehaviour::Echo(expected)),
            FakeSigner::new(1, SignerBehaviour::Unreachable),
        ];
        let ctx = context(reference_chain(), signers);

        let err = MintService::new(&ctx)
            .mint(id(9), addr(1), id(1))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn test_run_tracks_failure() {
        let mut run = MintRun::new(id(1));
        assert_eq!(run.stage(), &MintStage::Idle);

        let ok: ServiceResult<()> = Ok(());
        run.track(ok, MintStage::IdentityResolved).unwrap();
        assert_eq!(run.stage(), &MintStage::IdentityResolved);

        let err: ServiceResult<()> = Err(DomainError::NothingToMint.into());
        assert!(run.track(err, MintStage::Scanned).is_err());
        assert!(matches!(run.stage(), MintStage::Failed(reason) if reason == "Nothing to mint"));
        assert!(run.stage().is_terminal());
    }
}
