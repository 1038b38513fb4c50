//! Identity entity - a social account and the wallets linked to it

use serde::{Deserialize, Serialize};

use crate::value_objects::{AccountId, Address};

/// Social account as returned by the identity resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: AccountId,
    pub display_name: String,
    pub verified_addresses: Vec<Address>,
}

impl Identity {
    /// Check whether `address` is cryptographically linked to this account
    pub fn is_verified(&self, address: &Address) -> bool {
        self.verified_addresses.contains(address)
    }
}
