//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Addresses are parsed during deserialization, so a malformed wallet never
//! reaches a service.

use serde::Deserialize;
use validator::Validate;

use likemint_core::{AccountId, Address};

/// `GET /scan` query string
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScanQuery {
    pub address: Address,

    /// Overrides the configured distinct-reactor cap
    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    pub limit: Option<usize>,
}

/// `POST /mint` body; the target comes from the session
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub reactor_id: AccountId,
}

/// `POST /session/challenge` body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChallengeRequest {
    pub address: Address,
}

/// `POST /session` body
///
/// `message` is the text returned by `POST /session/challenge` and
/// `signature` its `0x`-hex EIP-191 signature by `address`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SessionRequest {
    pub address: Address,

    #[validate(length(min = 1, max = 1024, message = "Message must be 1-1024 characters"))]
    pub message: String,

    #[validate(length(equal = 132, message = "Signature must be 65 bytes of 0x-prefixed hex"))]
    pub signature: String,
}

/// `GET /events` query string
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventsQuery {
    pub address: Address,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}
