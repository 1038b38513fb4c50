//! Reaction aggregator
//!
//! Walks a target's reaction feed page by page and folds every `like` into
//! a per-reactor tally. Pages are fetched strictly in sequence because each
//! cursor comes from the previous response.
//!
//! The walk stops when the feed has no further cursor, when `depth_limit`
//! pages have been fetched, or when `max_results` distinct reactors have
//! been seen. Once the distinct cap is reached no new reactor is admitted,
//! but sightings of already-known reactors on the same page still count.

use std::collections::HashMap;

use tracing::{debug, instrument};

use likemint_core::traits::ReactionFeed;
use likemint_core::{AccountId, DomainError, ReactionEvent, ReactorTally, ScanResult};

use likemint_common::ScanConfig;

use super::error::ServiceResult;

/// Scan limits for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    pub max_results: usize,
    pub depth_limit: u32,
    pub page_size: u32,
}

impl From<ScanConfig> for ScanLimits {
    fn from(config: ScanConfig) -> Self {
        Self {
            max_results: config.max_results,
            depth_limit: config.depth_limit,
            page_size: config.page_size,
        }
    }
}

/// State carried across pages
#[derive(Debug, Default)]
pub struct ScanAccumulator {
    tallies: HashMap<AccountId, ReactorTally>,
    pages_fetched: u32,
    max_results: usize,
}

impl ScanAccumulator {
    pub fn new(max_results: usize) -> Self {
        Self {
            max_results,
            ..Self::default()
        }
    }

    /// Fold one notification into the tallies
    pub fn absorb(&mut self, event: &ReactionEvent) {
        if !event.is_like() {
            return;
        }
        for reactor in &event.reactors {
            if let Some(tally) = self.tallies.get_mut(&reactor.id) {
                tally.record(event.timestamp);
            } else if !self.is_full() {
                self.tallies.insert(
                    reactor.id,
                    ReactorTally::new(reactor.id, reactor.display_name.clone(), event.timestamp),
                );
            }
        }
    }

    /// Distinct-reactor cap reached
    pub fn is_full(&self) -> bool {
        self.tallies.len() >= self.max_results
    }

    pub fn distinct(&self) -> usize {
        self.tallies.len()
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn finish(self) -> ScanResult {
        ScanResult::from_tallies(self.tallies)
    }
}

/// Paginated feed traversal
pub struct ReactionAggregator<'a> {
    feed: &'a dyn ReactionFeed,
}

impl<'a> ReactionAggregator<'a> {
    pub fn new(feed: &'a dyn ReactionFeed) -> Self {
        Self { feed }
    }

    /// Scan `target_id`'s reactions starting at `page_cursor`
    ///
    /// Any feed failure aborts the whole scan; no partial result is returned.
    #[instrument(skip(self), fields(target = %target_id))]
    pub async fn scan(
        &self,
        target_id: AccountId,
        limits: ScanLimits,
        page_cursor: Option<String>,
    ) -> ServiceResult<ScanResult> {
        if limits.max_results == 0 {
            return Err(DomainError::validation("max_results must be positive").into());
        }
        if limits.depth_limit == 0 {
            return Err(DomainError::validation("depth_limit must be positive").into());
        }

        let mut acc = ScanAccumulator::new(limits.max_results);
        let mut cursor = page_cursor;

        loop {
            let page = self
                .feed
                .fetch_page(target_id, cursor.as_deref(), limits.page_size)
                .await?;
            acc.pages_fetched += 1;

            for event in &page.events {
                acc.absorb(event);
            }

            debug!(
                page = acc.pages_fetched(),
                distinct = acc.distinct(),
                "scanned page"
            );

            cursor = match page.next_cursor {
                Some(next) if !acc.is_full() && acc.pages_fetched() < limits.depth_limit => {
                    Some(next)
                }
                _ => break,
            };
        }

        Ok(acc.finish())
    }
}
