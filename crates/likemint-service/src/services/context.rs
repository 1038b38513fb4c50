//! Service context - dependency container for services
//!
//! Every long-lived collaborator is constructed once at startup and injected
//! here as a trait object. The API server fills in everything; the signer
//! service leaves out the signer list, the event store, and the JWT service.

use std::sync::Arc;
use std::time::Duration;

use likemint_common::auth::JwtService;
use likemint_common::ScanConfig;
use likemint_core::traits::{
    BoundaryReader, ChainEventRepository, IdentityResolver, ReactionFeed, Signer,
};

use super::challenge::{ChallengeStore, DEFAULT_CHALLENGE_TTL_SECS, DEFAULT_SIGN_IN_DOMAIN};
use super::error::{ServiceError, ServiceResult};

const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Collaborators
    identity: Arc<dyn IdentityResolver>,
    feed: Arc<dyn ReactionFeed>,
    boundaries: Arc<dyn BoundaryReader>,
    signers: Vec<Arc<dyn Signer>>,
    events: Option<Arc<dyn ChainEventRepository>>,

    // Services
    jwt_service: Option<Arc<JwtService>>,
    challenges: Arc<ChallengeStore>,

    // Settings
    scan: ScanConfig,
    ready_timeout: Duration,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Collaborators ===

    pub fn identity(&self) -> &dyn IdentityResolver {
        self.identity.as_ref()
    }

    pub fn feed(&self) -> &dyn ReactionFeed {
        self.feed.as_ref()
    }

    pub fn boundaries(&self) -> &dyn BoundaryReader {
        self.boundaries.as_ref()
    }

    /// Signer clients in configuration order
    pub fn signers(&self) -> &[Arc<dyn Signer>] {
        &self.signers
    }

    /// Mirror store; absent in the signer service
    pub fn events(&self) -> ServiceResult<&dyn ChainEventRepository> {
        self.events
            .as_deref()
            .ok_or_else(|| ServiceError::internal("event store is not configured"))
    }

    // === Services ===

    pub fn jwt_service(&self) -> ServiceResult<&JwtService> {
        self.jwt_service
            .as_deref()
            .ok_or_else(|| ServiceError::internal("session tokens are not configured"))
    }

    /// Outstanding sign-in challenges, shared by every clone of the context
    pub fn challenges(&self) -> &ChallengeStore {
        &self.challenges
    }

    // === Settings ===

    pub fn scan_config(&self) -> ScanConfig {
        self.scan
    }

    /// Bounded wait for the feed and chain to report ready
    pub fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("signers", &self.signers.len())
            .field("events", &self.events.is_some())
            .field("scan", &self.scan)
            .field("ready_timeout", &self.ready_timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    identity: Option<Arc<dyn IdentityResolver>>,
    feed: Option<Arc<dyn ReactionFeed>>,
    boundaries: Option<Arc<dyn BoundaryReader>>,
    signers: Vec<Arc<dyn Signer>>,
    events: Option<Arc<dyn ChainEventRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    sign_in: Option<(String, i64)>,
    scan: Option<ScanConfig>,
    ready_timeout: Option<Duration>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityResolver>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn feed(mut self, feed: Arc<dyn ReactionFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn boundaries(mut self, boundaries: Arc<dyn BoundaryReader>) -> Self {
        self.boundaries = Some(boundaries);
        self
    }

    /// Append a signer; call order defines signature order
    pub fn signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signers.push(signer);
        self
    }

    pub fn events(mut self, events: Arc<dyn ChainEventRepository>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Domain named in sign-in messages and how long a challenge stays valid
    pub fn sign_in(mut self, domain: impl Into<String>, challenge_ttl_secs: i64) -> Self {
        self.sign_in = Some((domain.into(), challenge_ttl_secs));
        self
    }

    pub fn scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = Some(scan);
        self
    }

    pub fn ready_timeout(mut self, timeout: Duration) -> Self {
        self.ready_timeout = Some(timeout);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let scan = self.scan.unwrap_or_default();
        if scan.max_results == 0 || scan.depth_limit == 0 || scan.page_size == 0 {
            return Err(ServiceError::validation("scan limits must be positive"));
        }
        let (domain, ttl) = self
            .sign_in
            .unwrap_or_else(|| (DEFAULT_SIGN_IN_DOMAIN.to_string(), DEFAULT_CHALLENGE_TTL_SECS));
        if ttl <= 0 {
            return Err(ServiceError::validation("challenge TTL must be positive"));
        }

        Ok(ServiceContext {
            identity: self
                .identity
                .ok_or_else(|| ServiceError::validation("identity is required"))?,
            feed: self
                .feed
                .ok_or_else(|| ServiceError::validation("feed is required"))?,
            boundaries: self
                .boundaries
                .ok_or_else(|| ServiceError::validation("boundaries is required"))?,
            signers: self.signers,
            events: self.events,
            jwt_service: self.jwt_service,
            challenges: Arc::new(ChallengeStore::new(domain, ttl)),
            scan,
            ready_timeout: self.ready_timeout.unwrap_or(DEFAULT_READY_TIMEOUT),
        })
    }
}
