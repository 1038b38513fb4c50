//! Reaction feed entities

use serde::{Deserialize, Serialize};

use crate::value_objects::{AccountId, Timestamp};

/// Kind of reaction notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Recast,
    #[serde(other)]
    Other,
}

/// Account that reacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactor {
    pub id: AccountId,
    pub display_name: String,
}

impl Reactor {
    pub fn new(id: AccountId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// One notification from the reaction feed
///
/// A notification may group several reactors; every reactor in it shares the
/// notification's timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub kind: ReactionKind,
    pub timestamp: Timestamp,
    pub reactors: Vec<Reactor>,
}

impl ReactionEvent {
    /// Create a "like" notification
    pub fn like(timestamp: Timestamp, reactors: Vec<Reactor>) -> Self {
        Self {
            kind: ReactionKind::Like,
            timestamp,
            reactors,
        }
    }

    #[inline]
    pub fn is_like(&self) -> bool {
        self.kind == ReactionKind::Like
    }
}

/// One page of the reaction feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionPage {
    pub events: Vec<ReactionEvent>,
    pub next_cursor: Option<String>,
}
