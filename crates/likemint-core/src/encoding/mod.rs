//! Canonical byte encodings shared with the on-chain contract
//!
//! - `abi`: the mint call's ABI shape and keccak-256
//! - `eip191`: personal-message digests used by signers and sessions

pub mod abi;
pub mod eip191;

pub use abi::{keccak256, uint_id, uint_time, MintPayload};
pub use eip191::{personal_digest, personal_message_hash};
