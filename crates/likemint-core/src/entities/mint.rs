//! Mint arguments and signer attestations
//!
//! `MintArguments` is a named struct internally, but its wire form is the
//! positional tuple
//! `(targetAddress, targetId, [reactorIds], [counts], [startTimes], [endTimes])`
//! and its digest is `keccak256(abi.encode(...))` over the same order. Both
//! the signer services and the contract depend on that exact layout.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::encoding::{keccak256, uint_id, uint_time, MintPayload};
use crate::error::DomainError;
use crate::value_objects::{AccountId, Address, Timestamp};

/// One reactor's attributable activity in this mint cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactorEntry {
    pub reactor_id: AccountId,
    pub count: u64,
    pub window_start: Timestamp,
    pub window_end: Timestamp,
}

impl ReactorEntry {
    pub fn new(
        reactor_id: AccountId,
        count: u64,
        window_start: Timestamp,
        window_end: Timestamp,
    ) -> Self {
        Self {
            reactor_id,
            count,
            window_start,
            window_end,
        }
    }
}

/// Canonical arguments of one mint call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MintArgumentsWire", try_from = "MintArgumentsWire")]
pub struct MintArguments {
    target_address: Address,
    target_id: AccountId,
    reactor_ids: Vec<AccountId>,
    counts: Vec<u64>,
    start_times: Vec<Timestamp>,
    end_times: Vec<Timestamp>,
}

/// Positional wire form of `MintArguments`
#[derive(Serialize, Deserialize)]
struct MintArgumentsWire(
    Address,
    AccountId,
    Vec<AccountId>,
    Vec<u64>,
    Vec<Timestamp>,
    Vec<Timestamp>,
);

impl MintArguments {
    /// Lay out entries as four parallel arrays, preserving input order
    ///
    /// Callers validate the entries first; see `MintArgumentBuilder`.
    pub fn from_entries(
        target_address: Address,
        target_id: AccountId,
        entries: &[ReactorEntry],
    ) -> Self {
        Self {
            target_address,
            target_id,
            reactor_ids: entries.iter().map(|e| e.reactor_id).collect(),
            counts: entries.iter().map(|e| e.count).collect(),
            start_times: entries.iter().map(|e| e.window_start).collect(),
            end_times: entries.iter().map(|e| e.window_end).collect(),
        }
    }

    pub fn target_address(&self) -> Address {
        self.target_address
    }

    pub fn target_id(&self) -> AccountId {
        self.target_id
    }

    pub fn reactor_ids(&self) -> &[AccountId] {
        &self.reactor_ids
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn start_times(&self) -> &[Timestamp] {
        &self.start_times
    }

    pub fn end_times(&self) -> &[Timestamp] {
        &self.end_times
    }

    /// Number of reactors in the mint
    pub fn len(&self) -> usize {
        self.reactor_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactor_ids.is_empty()
    }

    /// Total tokens minted across all reactors
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Reassemble the per-reactor entries
    pub fn entries(&self) -> Vec<ReactorEntry> {
        (0..self.len())
            .map(|i| {
                ReactorEntry::new(
                    self.reactor_ids[i],
                    self.counts[i],
                    self.start_times[i],
                    self.end_times[i],
                )
            })
            .collect()
    }

    /// The ABI payload, field for field
    pub fn payload(&self) -> MintPayload {
        MintPayload {
            targetAddress: self.target_address.into(),
            targetId: uint_id(self.target_id),
            reactorIds: self.reactor_ids.iter().copied().map(uint_id).collect(),
            counts: self.counts.iter().map(|c| U256::from(*c)).collect(),
            startTimes: self.start_times.iter().copied().map(uint_time).collect(),
            endTimes: self.end_times.iter().copied().map(uint_time).collect(),
        }
    }

    /// `abi.encode(address, uint256, uint256[], uint256[], uint256[], uint256[])`
    pub fn encode(&self) -> Vec<u8> {
        self.payload().encode()
    }

    /// `keccak256` of the ABI encoding; this is what signers sign
    pub fn digest(&self) -> [u8; 32] {
        keccak256(self.encode())
    }
}

impl From<MintArguments> for MintArgumentsWire {
    fn from(args: MintArguments) -> Self {
        Self(
            args.target_address,
            args.target_id,
            args.reactor_ids,
            args.counts,
            args.start_times,
            args.end_times,
        )
    }
}

impl TryFrom<MintArgumentsWire> for MintArguments {
    type Error = DomainError;

    fn try_from(wire: MintArgumentsWire) -> Result<Self, Self::Error> {
        let MintArgumentsWire(target_address, target_id, reactor_ids, counts, start_times, end_times) =
            wire;

        let n = reactor_ids.len();
        if counts.len() != n || start_times.len() != n || end_times.len() != n {
            return Err(DomainError::validation(
                "mint argument arrays must have equal length",
            ));
        }
        if start_times.iter().chain(&end_times).any(|t| *t < 0) {
            return Err(DomainError::validation("mint window times must be non-negative"));
        }

        Ok(Self {
            target_address,
            target_id,
            reactor_ids,
            counts,
            start_times,
            end_times,
        })
    }
}

/// 65-byte recoverable ECDSA signature (`r || s || v`)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttestationSignature([u8; 65]);

impl AttestationSignature {
    pub const LEN: usize = 65;

    pub const fn new(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DomainError> {
        let array: [u8; 65] = bytes.try_into().map_err(|_| {
            DomainError::validation(format!(
                "signature must be {} bytes, got {}",
                Self::LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// Recovery byte as carried on the wire (27 or 28)
    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl fmt::Display for AttestationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AttestationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttestationSignature({self})")
    }
}

impl Serialize for AttestationSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AttestationSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)?;
        Self::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

/// Body sent to each signer service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationRequest {
    pub reactor_id: AccountId,
    pub target_id: AccountId,
    pub target_address: Address,
}

/// One signer's answer: the arguments it computed and its signature over them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAttestation {
    pub signer: usize,
    pub arguments: MintArguments,
    pub signature: AttestationSignature,
}

/// Mint arguments plus every configured signer's signature, in configuration order
///
/// Wire form: `(...MintArguments, [sig_0 .. sig_{N-1}])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CombinedWire", try_from = "CombinedWire")]
pub struct CombinedAttestation {
    pub arguments: MintArguments,
    pub signatures: Vec<AttestationSignature>,
}

#[derive(Serialize, Deserialize)]
struct CombinedWire(
    Address,
    AccountId,
    Vec<AccountId>,
    Vec<u64>,
    Vec<Timestamp>,
    Vec<Timestamp>,
    Vec<AttestationSignature>,
);

impl From<CombinedAttestation> for CombinedWire {
    fn from(combined: CombinedAttestation) -> Self {
        let MintArgumentsWire(address, target, ids, counts, starts, ends) =
            combined.arguments.into();
        Self(address, target, ids, counts, starts, ends, combined.signatures)
    }
}

impl TryFrom<CombinedWire> for CombinedAttestation {
    type Error = DomainError;

    fn try_from(wire: CombinedWire) -> Result<Self, Self::Error> {
        let CombinedWire(address, target, ids, counts, starts, ends, signatures) = wire;
        let arguments =
            MintArguments::try_from(MintArgumentsWire(address, target, ids, counts, starts, ends))?;
        Ok(Self {
            arguments,
            signatures,
        })
    }
}
