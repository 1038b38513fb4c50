//! In-memory fakes of every collaborator trait

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use likemint_common::EthereumKey;
use likemint_core::traits::{
    BoundaryReader, ChainEventRepository, ChainEventSource, IdentityResolver, ReactionFeed,
    RepoResult, Signer,
};
use likemint_core::{
    AccountId, Address, AttestationRequest, ChainEvent, DomainError, Identity, MintArguments,
    ReactionEvent, ReactionPage, Reactor, SignedAttestation, Timestamp,
};

pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub fn id(n: u64) -> AccountId {
    AccountId::new(n)
}

pub fn addr(n: u8) -> Address {
    Address::new([n; 20])
}

pub fn like(t: Timestamp, reactors: &[u64]) -> ReactionEvent {
    ReactionEvent::like(
        t,
        reactors
            .iter()
            .map(|r| Reactor::new(id(*r), format!("user{r}")))
            .collect(),
    )
}

// ============================================================================
// Identity
// ============================================================================

#[derive(Default)]
pub struct FakeIdentity {
    accounts: HashMap<Address, Identity>,
}

impl FakeIdentity {
    /// Link `address` to `account`; `verified` controls the verified list
    pub fn with(mut self, address: Address, account: AccountId, verified: bool) -> Self {
        self.accounts.insert(
            address,
            Identity {
                id: account,
                display_name: format!("account{account}"),
                verified_addresses: if verified { vec![address] } else { Vec::new() },
            },
        );
        self
    }
}

#[async_trait]
impl IdentityResolver for FakeIdentity {
    async fn resolve_by_address(&self, address: &Address) -> RepoResult<Identity> {
        self.accounts
            .get(address)
            .cloned()
            .ok_or(DomainError::AccountNotFound(*address))
    }
}

// ============================================================================
// Feed
// ============================================================================

/// Serves `pages[i]` for cursor `None` (i = 0) or `Some("i")`
#[derive(Default)]
pub struct FakeFeed {
    pages: Vec<Vec<ReactionEvent>>,
    fetches: AtomicU32,
    fail_at: Option<usize>,
    ready_delay: Option<Duration>,
}

impl FakeFeed {
    pub fn with_pages(pages: Vec<Vec<ReactionEvent>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Fail when page `index` is requested
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn slow_ready(mut self, delay: Duration) -> Self {
        self.ready_delay = Some(delay);
        self
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReactionFeed for FakeFeed {
    async fn fetch_page(
        &self,
        _target_id: AccountId,
        cursor: Option<&str>,
        _page_size: u32,
    ) -> RepoResult<ReactionPage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let index: usize = cursor.map_or(Ok(0), str::parse).map_err(|_| DomainError::fetch("bad cursor"))?;
        if self.fail_at == Some(index) {
            return Err(DomainError::fetch("feed unavailable"));
        }
        let events = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());
        Ok(ReactionPage {
            events,
            next_cursor,
        })
    }

    async fn ready(&self) -> RepoResult<()> {
        if let Some(delay) = self.ready_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

// ============================================================================
// Chain
// ============================================================================

#[derive(Default)]
pub struct FakeChain {
    boundaries: HashMap<(AccountId, AccountId), Timestamp>,
    events: Vec<ChainEvent>,
    head: u64,
    fail_events: bool,
}

impl FakeChain {
    pub fn with_boundary(mut self, target: AccountId, reactor: AccountId, t: Timestamp) -> Self {
        self.boundaries.insert((target, reactor), t);
        self
    }

    pub fn with_events(mut self, head: u64, events: Vec<ChainEvent>) -> Self {
        self.head = head;
        self.events = events;
        self
    }

    pub fn failing_events(mut self) -> Self {
        self.fail_events = true;
        self
    }
}

#[async_trait]
impl BoundaryReader for FakeChain {
    async fn range_close(&self, target_id: AccountId, reactor_id: AccountId) -> RepoResult<Timestamp> {
        Ok(self.boundaries.get(&(target_id, reactor_id)).copied().unwrap_or(0))
    }

    async fn range_close_batch(
        &self,
        target_ids: &[AccountId],
        reactor_ids: &[AccountId],
    ) -> RepoResult<Vec<Timestamp>> {
        if target_ids.len() != reactor_ids.len() {
            return Err(DomainError::validation("length mismatch"));
        }
        let mut out = Vec::with_capacity(target_ids.len());
        for (t, r) in target_ids.iter().zip(reactor_ids) {
            out.push(self.range_close(*t, *r).await?);
        }
        Ok(out)
    }

    async fn ready(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ChainEventSource for FakeChain {
    async fn head_block(&self) -> RepoResult<u64> {
        Ok(self.head)
    }

    async fn events(&self, from_block: u64, to_block: u64) -> RepoResult<Vec<ChainEvent>> {
        if self.fail_events {
            return Err(DomainError::fetch("rpc down"));
        }
        Ok(self
            .events
            .iter()
            .filter(|e| (from_block..=to_block).contains(&e.block_number))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Signers
// ============================================================================

pub enum SignerBehaviour {
    /// Sign whatever arguments it was given
    Echo(MintArguments),
    Unreachable,
    Reject(&'static str),
}

pub struct FakeSigner {
    index: usize,
    key: EthereumKey,
    behaviour: SignerBehaviour,
    pub calls: AtomicU32,
}

impl FakeSigner {
    pub fn new(index: usize, behaviour: SignerBehaviour) -> Arc<Self> {
        Arc::new(Self {
            index,
            key: EthereumKey::from_hex(DEV_KEY).unwrap(),
            behaviour,
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl Signer for FakeSigner {
    fn index(&self) -> usize {
        self.index
    }

    async fn attest(&self, _request: &AttestationRequest) -> RepoResult<SignedAttestation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            SignerBehaviour::Echo(arguments) => Ok(SignedAttestation {
                signer: self.index,
                arguments: arguments.clone(),
                signature: self
                    .key
                    .sign_mint(arguments)
                    .map_err(|e| DomainError::Internal(e.to_string()))?,
            }),
            SignerBehaviour::Unreachable => Err(DomainError::SignerUnreachable {
                signer: self.index,
                reason: "connection refused".to_string(),
            }),
            SignerBehaviour::Reject(reason) => Err(DomainError::SignerRejected {
                signer: self.index,
                reason: (*reason).to_string(),
            }),
        }
    }
}

// ============================================================================
// Event store
// ============================================================================

#[derive(Default)]
pub struct FakeEventStore {
    pub rows: Mutex<Vec<ChainEvent>>,
    pub cursor: Mutex<Option<u64>>,
    pub fail_upsert: bool,
}

#[async_trait]
impl ChainEventRepository for FakeEventStore {
    async fn upsert_events(&self, events: &[ChainEvent]) -> RepoResult<u64> {
        if self.fail_upsert {
            return Err(DomainError::Database("write failed".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let mut inserted = 0;
        for event in events {
            let exists = rows
                .iter()
                .any(|r| r.tx_hash == event.tx_hash && r.log_index == event.log_index);
            if !exists {
                rows.push(event.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn cursor(&self) -> RepoResult<Option<u64>> {
        Ok(*self.cursor.lock().unwrap())
    }

    async fn set_cursor(&self, block: u64) -> RepoResult<()> {
        *self.cursor.lock().unwrap() = Some(block);
        Ok(())
    }

    async fn find_by_recipient(&self, recipient: &Address, limit: i64) -> RepoResult<Vec<ChainEvent>> {
        let mut found: Vec<ChainEvent> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.recipient == *recipient)
            .cloned()
            .collect();
        found.sort_by(|a, b| (b.block_number, b.log_index).cmp(&(a.block_number, a.log_index)));
        found.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(found)
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
