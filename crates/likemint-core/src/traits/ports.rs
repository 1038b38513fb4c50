//! Collaborator traits (ports) - define the interface to everything outside the core
//!
//! The domain layer states what it needs; the `likemint-clients` and
//! `likemint-db` crates provide the implementations. Every long-lived client
//! is constructed once at startup and injected as `Arc<dyn Trait>`.

use async_trait::async_trait;

use crate::entities::{
    AttestationRequest, ChainEvent, Identity, ReactionPage, SignedAttestation,
};
use crate::error::DomainError;
use crate::value_objects::{AccountId, Address, Timestamp};

/// Result type for collaborator operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Identity
// ============================================================================

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Map a wallet address to its social account
    ///
    /// Fails with `AccountNotFound` if no account is linked to the address.
    async fn resolve_by_address(&self, address: &Address) -> RepoResult<Identity>;
}

// ============================================================================
// Reaction Feed
// ============================================================================

#[async_trait]
pub trait ReactionFeed: Send + Sync {
    /// Fetch one page of reaction notifications for `target_id`
    async fn fetch_page(
        &self,
        target_id: AccountId,
        cursor: Option<&str>,
        page_size: u32,
    ) -> RepoResult<ReactionPage>;

    /// Cheap probe used before a scan starts
    async fn ready(&self) -> RepoResult<()>;
}

// ============================================================================
// Chain
// ============================================================================

#[async_trait]
pub trait BoundaryReader: Send + Sync {
    /// Range close recorded for the (target, reactor) pair, zero if never minted
    async fn range_close(&self, target_id: AccountId, reactor_id: AccountId)
        -> RepoResult<Timestamp>;

    /// Batched lookup; output is positionally aligned with the inputs
    async fn range_close_batch(
        &self,
        target_ids: &[AccountId],
        reactor_ids: &[AccountId],
    ) -> RepoResult<Vec<Timestamp>>;

    /// Cheap probe used before a scan or mint starts
    async fn ready(&self) -> RepoResult<()>;
}

#[async_trait]
pub trait ChainEventSource: Send + Sync {
    /// Latest block number
    async fn head_block(&self) -> RepoResult<u64>;

    /// Mint and Claim events in the inclusive block range
    async fn events(&self, from_block: u64, to_block: u64) -> RepoResult<Vec<ChainEvent>>;
}

// ============================================================================
// Signers
// ============================================================================

#[async_trait]
pub trait Signer: Send + Sync {
    /// Position of this signer in the configured signer list
    fn index(&self) -> usize;

    /// Ask the signer service to compute and sign mint arguments
    ///
    /// Fails with `SignerUnreachable` on transport errors and `SignerRejected`
    /// when the service answers with an error.
    async fn attest(&self, request: &AttestationRequest) -> RepoResult<SignedAttestation>;
}

// ============================================================================
// Event Mirror Store
// ============================================================================

#[async_trait]
pub trait ChainEventRepository: Send + Sync {
    /// Insert events, ignoring rows already present (same tx hash and log index)
    ///
    /// Returns the number of newly inserted rows.
    async fn upsert_events(&self, events: &[ChainEvent]) -> RepoResult<u64>;

    /// Last block fully mirrored, if any
    async fn cursor(&self) -> RepoResult<Option<u64>>;

    /// Record that every block up to and including `block` is mirrored
    async fn set_cursor(&self, block: u64) -> RepoResult<()>;

    /// Mirrored events paid to `recipient`, newest first
    async fn find_by_recipient(&self, recipient: &Address, limit: i64)
        -> RepoResult<Vec<ChainEvent>>;

    /// Connectivity check
    async fn ping(&self) -> RepoResult<()>;
}
