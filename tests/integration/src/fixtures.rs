//! In-memory collaborators and reference data
//!
//! Reference scenario: the target (account 9, wallet of `TARGET_KEY`) was
//! liked by reactor 1 at t=100 and t=200 and by reactor 2 at t=150.
//! Reactor 1's range with the target closed at t=150; reactor 2 never
//! minted.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use likemint_core::traits::{
    BoundaryReader, ChainEventRepository, IdentityResolver, ReactionFeed, RepoResult,
};
use likemint_core::{
    AccountId, Address, ChainEvent, ChainEventKind, DomainError, Identity, ReactionEvent,
    ReactionPage, Reactor, Timestamp,
};

/// Well-known development keys (Anvil accounts 0-2)
pub const TARGET_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const SIGNER_KEYS: [&str; 2] = [
    "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
    "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
];

pub const TARGET_ID: AccountId = AccountId::new(9);
pub const REACTOR_A: AccountId = AccountId::new(1);
pub const REACTOR_B: AccountId = AccountId::new(2);

// ============================================================================
// Identity
// ============================================================================

#[derive(Default)]
pub struct MemoryIdentity {
    accounts: HashMap<Address, Identity>,
}

impl MemoryIdentity {
    pub fn link(mut self, address: Address, account: AccountId, verified: bool) -> Self {
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
impl IdentityResolver for MemoryIdentity {
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

/// Single-page feed
#[derive(Default)]
pub struct MemoryFeed {
    events: Vec<ReactionEvent>,
}

impl MemoryFeed {
    pub fn like(mut self, timestamp: Timestamp, reactor: AccountId) -> Self {
        self.events.push(ReactionEvent::like(
            timestamp,
            vec![Reactor::new(reactor, format!("user{reactor}"))],
        ));
        self
    }
}

#[async_trait]
impl ReactionFeed for MemoryFeed {
    async fn fetch_page(
        &self,
        _target_id: AccountId,
        _cursor: Option<&str>,
        _page_size: u32,
    ) -> RepoResult<ReactionPage> {
        Ok(ReactionPage {
            events: self.events.clone(),
            next_cursor: None,
        })
    }

    async fn ready(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Chain
// ============================================================================

#[derive(Default)]
pub struct MemoryChain {
    boundaries: HashMap<(AccountId, AccountId), Timestamp>,
}

impl MemoryChain {
    pub fn closed(mut self, target: AccountId, reactor: AccountId, at: Timestamp) -> Self {
        self.boundaries.insert((target, reactor), at);
        self
    }
}

#[async_trait]
impl BoundaryReader for MemoryChain {
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
        Ok(target_ids
            .iter()
            .zip(reactor_ids)
            .map(|(t, r)| self.boundaries.get(&(*t, *r)).copied().unwrap_or(0))
            .collect())
    }

    async fn ready(&self) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Event store
// ============================================================================

#[derive(Default)]
pub struct MemoryEventStore {
    rows: Mutex<Vec<ChainEvent>>,
    cursor: Mutex<Option<u64>>,
}

impl MemoryEventStore {
    pub fn with_events(events: Vec<ChainEvent>) -> Self {
        Self {
            rows: Mutex::new(events),
            cursor: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ChainEventRepository for MemoryEventStore {
    async fn upsert_events(&self, events: &[ChainEvent]) -> RepoResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        for event in events {
            if !rows
                .iter()
                .any(|r| r.tx_hash == event.tx_hash && r.log_index == event.log_index)
            {
                rows.push(event.clone());
            }
        }
        Ok((rows.len() - before) as u64)
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
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

/// A mirrored event
pub fn chain_event(kind: ChainEventKind, recipient: Address, block: u64) -> ChainEvent {
    ChainEvent {
        kind,
        recipient,
        account_id: TARGET_ID,
        amount: 10u128.pow(18),
        block_number: block,
        tx_hash: format!("0x{block:064x}"),
        log_index: 0,
    }
}

pub fn reference_feed() -> MemoryFeed {
    MemoryFeed::default()
        .like(200, REACTOR_A)
        .like(150, REACTOR_B)
        .like(100, REACTOR_A)
}

pub fn reference_chain() -> MemoryChain {
    MemoryChain::default().closed(TARGET_ID, REACTOR_A, 150)
}
