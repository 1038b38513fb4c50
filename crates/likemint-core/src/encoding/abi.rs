//! Solidity ABI shape of the mint call

use alloy_primitives::U256;
use alloy_sol_types::{sol, SolValue};

use crate::value_objects::{AccountId, Address, Timestamp};

sol! {
    /// Parameters of the contract's mint call, in ABI order
    struct MintPayload {
        address targetAddress;
        uint256 targetId;
        uint256[] reactorIds;
        uint256[] counts;
        uint256[] startTimes;
        uint256[] endTimes;
    }
}

/// Keccak-256 hash of the input bytes
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    alloy_primitives::keccak256(data).0
}

pub fn uint_id(id: AccountId) -> U256 {
    U256::from(id.into_inner())
}

/// Timestamps are non-negative once validated by the builder or wire decoding
pub fn uint_time(t: Timestamp) -> U256 {
    U256::from(t.unsigned_abs())
}

impl MintPayload {
    /// `abi.encode(targetAddress, targetId, reactorIds, counts, startTimes, endTimes)`
    pub fn encode(&self) -> Vec<u8> {
        self.abi_encode_params()
    }
}

impl From<Address> for alloy_primitives::Address {
    fn from(address: Address) -> Self {
        Self::from(*address.as_bytes())
    }
}

impl From<alloy_primitives::Address> for Address {
    fn from(address: alloy_primitives::Address) -> Self {
        Self::new(address.0 .0)
    }
}
