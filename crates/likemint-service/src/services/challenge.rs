//! Sign-in challenges
//!
//! `POST /session` only accepts a signature over a message this server handed
//! out. Each message carries a random nonce, is bound to one address, lives
//! for a fixed TTL and is removed the first time it is redeemed.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use likemint_core::Address;

pub const DEFAULT_SIGN_IN_DOMAIN: &str = "likemint";
pub const DEFAULT_CHALLENGE_TTL_SECS: i64 = 300;

#[derive(Debug, Clone)]
struct Pending {
    message: String,
    issued_at: DateTime<Utc>,
}

/// A freshly issued challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub message: String,
    pub nonce: String,
    pub expires_at: DateTime<Utc>,
}

/// Outstanding challenges, at most one per address
#[derive(Debug)]
pub struct ChallengeStore {
    domain: String,
    ttl: Duration,
    pending: DashMap<Address, Pending>,
}

impl ChallengeStore {
    pub fn new(domain: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            domain: domain.into(),
            ttl: Duration::seconds(ttl_secs),
            pending: DashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of challenges still held, expired ones included until the next issue
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Issue a challenge for `address`, replacing any earlier one
    pub fn issue(&self, address: Address, now: DateTime<Utc>) -> Challenge {
        self.pending.retain(|_, pending| !self.is_stale(pending, now));

        let nonce = Uuid::new_v4().simple().to_string();
        let message = format!(
            "{domain} wants you to sign in with your Ethereum account:\n{address}\n\nNonce: {nonce}\nIssued At: {issued}",
            domain = self.domain,
            issued = now.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        self.pending.insert(
            address,
            Pending {
                message: message.clone(),
                issued_at: now,
            },
        );

        Challenge {
            message,
            nonce,
            expires_at: now + self.ttl,
        }
    }

    /// Consume the challenge issued to `address` if `message` is exactly it
    ///
    /// Returns `false` when nothing matching is outstanding or the match has
    /// expired. A matching message is removed either way.
    pub fn redeem(&self, address: &Address, message: &str, now: DateTime<Utc>) -> bool {
        match self
            .pending
            .remove_if(address, |_, pending| pending.message == message)
        {
            Some((_, pending)) => !self.is_stale(&pending, now),
            None => false,
        }
    }

    fn is_stale(&self, pending: &Pending, now: DateTime<Utc>) -> bool {
        now >= pending.issued_at + self.ttl
    }
}

impl Default for ChallengeStore {
    fn default() -> Self {
        Self::new(DEFAULT_SIGN_IN_DOMAIN, DEFAULT_CHALLENGE_TTL_SECS)
    }
}
