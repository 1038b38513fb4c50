//! On-chain Mint / Claim events mirrored into the relational store

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::{AccountId, Address};

/// Which contract event a mirrored row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainEventKind {
    /// `Mint(address indexed to, uint256 indexed targetId, uint256 amount)`
    Mint,
    /// `Claim(address indexed to, uint256 indexed reactorId, uint256 amount)`
    Claim,
}

impl ChainEventKind {
    pub const ALL: [Self; 2] = [Self::Mint, Self::Claim];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mint => "mint",
            Self::Claim => "claim",
        }
    }
}

impl fmt::Display for ChainEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mint" => Ok(Self::Mint),
            "claim" => Ok(Self::Claim),
            other => Err(format!("unknown chain event kind: {other}")),
        }
    }
}

/// A decoded contract log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEvent {
    pub kind: ChainEventKind,
    pub recipient: Address,
    /// Target id for mints, reactor id for claims
    pub account_id: AccountId,
    #[serde(with = "amount_string")]
    pub amount: u128,
    pub block_number: u64,
    pub tx_hash: String,
    pub log_index: u32,
}

/// Amounts exceed JavaScript's safe integer range, so they travel as strings
mod amount_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
