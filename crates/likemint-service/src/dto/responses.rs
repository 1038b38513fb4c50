//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Success bodies
//! are wrapped as `{ "result": ... }`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use likemint_core::{
    AccountId, Address, AttestationSignature, CombinedAttestation, MintArguments, Timestamp,
};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

impl<T> ApiResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Per-reactor view of one scan, keyed by reactor id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Most recent reactor first
    pub reactor_ids: Vec<AccountId>,
    pub counts: BTreeMap<AccountId, u64>,
    pub names: BTreeMap<AccountId, String>,
    pub last_reaction_time: BTreeMap<AccountId, Timestamp>,
    pub last_mint_boundary: BTreeMap<AccountId, Timestamp>,
    /// Reactions after the boundary, i.e. what a mint would attribute now
    pub mintable: BTreeMap<AccountId, u64>,
    pub count: usize,
}

// ============================================================================
// Mint
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    /// Positional tuple ready for the contract call, signatures last
    pub mint_arguments: CombinedAttestation,
}

/// Signer service answer to `POST /attest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestResponse {
    pub arguments: MintArguments,
    pub signature: AttestationSignature,
}

/// Signer service answer to `GET /address`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerInfoResponse {
    pub address: Address,
}

// ============================================================================
// Session
// ============================================================================

/// Message to sign for `POST /session`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub message: String,
    pub nonce: String,
    /// Seconds until the challenge can no longer be redeemed
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub account_id: AccountId,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub feed: String,
    pub chain: String,
}

fn label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, feed_healthy: bool, chain_healthy: bool) -> Self {
        let all_healthy = database_healthy && feed_healthy && chain_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database_healthy),
                feed: label(feed_healthy),
                chain: label(chain_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
