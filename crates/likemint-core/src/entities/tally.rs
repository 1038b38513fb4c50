//! Per-reactor tallies and the aggregate result of one feed scan

use std::collections::HashMap;

use crate::value_objects::{AccountId, Timestamp};

/// Running tally for one distinct reactor within a scan
///
/// Created on first sighting with a count of one. Every later sighting adds
/// one and raises `last_reaction_time`; nothing ever lowers either value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactorTally {
    id: AccountId,
    display_name: String,
    last_reaction_time: Timestamp,
    sightings: Vec<Timestamp>,
}

impl ReactorTally {
    /// First sighting of a reactor
    pub fn new(id: AccountId, display_name: impl Into<String>, reaction_time: Timestamp) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            last_reaction_time: reaction_time,
            sightings: vec![reaction_time],
        }
    }

    /// Record another sighting of the same reactor
    pub fn record(&mut self, reaction_time: Timestamp) {
        self.sightings.push(reaction_time);
        self.last_reaction_time = self.last_reaction_time.max(reaction_time);
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn like_count(&self) -> u64 {
        self.sightings.len() as u64
    }

    pub fn last_reaction_time(&self) -> Timestamp {
        self.last_reaction_time
    }

    /// Timestamp of every sighting, in the order they were seen
    pub fn sightings(&self) -> &[Timestamp] {
        &self.sightings
    }
}

/// Aggregate output of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    reactor_ids: Vec<AccountId>,
    tallies: HashMap<AccountId, ReactorTally>,
    boundaries: HashMap<AccountId, Timestamp>,
}

impl ScanResult {
    /// Order tallies by most recent reaction first, ties by ascending id
    pub fn from_tallies(tallies: HashMap<AccountId, ReactorTally>) -> Self {
        let mut reactor_ids: Vec<AccountId> = tallies.keys().copied().collect();
        reactor_ids.sort_by(|a, b| {
            let ta = tallies[a].last_reaction_time;
            let tb = tallies[b].last_reaction_time;
            tb.cmp(&ta).then_with(|| a.cmp(b))
        });

        Self {
            reactor_ids,
            tallies,
            boundaries: HashMap::new(),
        }
    }

    /// Attach the last-mint boundary of each reactor
    pub fn with_boundaries(mut self, boundaries: HashMap<AccountId, Timestamp>) -> Self {
        self.boundaries = boundaries;
        self
    }

    /// Reactor ids, most recent first
    pub fn reactor_ids(&self) -> &[AccountId] {
        &self.reactor_ids
    }

    /// Number of distinct reactors
    pub fn count(&self) -> usize {
        self.reactor_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactor_ids.is_empty()
    }

    pub fn tally(&self, id: AccountId) -> Option<&ReactorTally> {
        self.tallies.get(&id)
    }

    /// Tallies in result order
    pub fn tallies(&self) -> impl Iterator<Item = &ReactorTally> {
        self.reactor_ids.iter().filter_map(|id| self.tallies.get(id))
    }

    /// Last-mint boundary for a reactor, zero when never minted or unknown
    pub fn boundary(&self, id: AccountId) -> Timestamp {
        self.boundaries.get(&id).copied().unwrap_or(0)
    }
}
