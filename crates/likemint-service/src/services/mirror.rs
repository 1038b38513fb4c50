//! Chain event mirror
//!
//! Copies contract `Mint` and `Claim` logs into the relational store in
//! bounded block spans. The persisted cursor is advanced only after the
//! span's events are stored, so a failed tick is retried from the same
//! place on the next one (at-least-once; inserts are idempotent).

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

use likemint_common::ChainConfig;
use likemint_core::traits::{ChainEventRepository, ChainEventSource};

use super::error::ServiceResult;

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorProgress {
    /// Already at the chain head
    UpToDate,
    /// Blocks `from..=to` were mirrored, `inserted` rows were new
    Advanced { from: u64, to: u64, inserted: u64 },
}

pub struct EventMirror {
    source: Arc<dyn ChainEventSource>,
    store: Arc<dyn ChainEventRepository>,
    start_block: u64,
    max_span: u64,
    interval: Duration,
}

impl EventMirror {
    pub fn new(
        source: Arc<dyn ChainEventSource>,
        store: Arc<dyn ChainEventRepository>,
        config: &ChainConfig,
    ) -> Self {
        Self {
            source,
            store,
            start_block: config.mirror_start_block,
            max_span: config.mirror_max_block_span.max(1),
            interval: config.mirror_interval(),
        }
    }

    /// Mirror the next span of blocks
    #[instrument(skip(self))]
    pub async fn tick(&self) -> ServiceResult<MirrorProgress> {
        let from = match self.store.cursor().await? {
            Some(done) => done + 1,
            None => self.start_block,
        };
        let head = self.source.head_block().await?;
        if from > head {
            debug!(head, "mirror up to date");
            return Ok(MirrorProgress::UpToDate);
        }

        let to = head.min(from.saturating_add(self.max_span - 1));
        let events = self.source.events(from, to).await?;
        let inserted = self.store.upsert_events(&events).await?;
        self.store.set_cursor(to).await?;

        if inserted > 0 {
            info!(from, to, inserted, "mirrored chain events");
        }
        Ok(MirrorProgress::Advanced { from, to, inserted })
    }

    /// Tick forever on the configured interval; errors are logged and the
    /// next tick retries
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = self.tick().await {
                error!(error = %e, "event mirror tick failed");
            }
        }
    }

    /// Run on a background task
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            start_block = self.start_block,
            interval = ?self.interval,
            "starting event mirror"
        );
        tokio::spawn(self.run())
    }
}
