//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AccountId, Address};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Lookup Errors
    // =========================================================================
    #[error("No account linked to address {0}")]
    AccountNotFound(Address),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Address {address} is not verified for account {account_id}")]
    Unverified {
        address: Address,
        account_id: AccountId,
    },

    #[error("No active session")]
    InvalidSession,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Minting Errors
    // =========================================================================
    #[error("Nothing to mint")]
    NothingToMint,

    #[error("Signer {signer} unreachable: {reason}")]
    SignerUnreachable { signer: usize, reason: String },

    #[error("Signer {signer} rejected attestation: {reason}")]
    SignerRejected { signer: usize, reason: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Upstream fetch failed: {0}")]
    Fetch(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create an upstream fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unverified { .. } => "UNVERIFIED_ADDRESS",
            Self::InvalidSession => "INVALID_SESSION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NothingToMint => "NOTHING_TO_MINT",
            Self::SignerUnreachable { .. } => "SIGNER_UNREACHABLE",
            Self::SignerRejected { .. } => "SIGNER_REJECTED",
            Self::Fetch(_) => "FETCH_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_) | Self::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Unverified { .. })
    }

    /// Check if the caller has no usable session
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::InvalidSession)
    }

    /// Check if a well-formed request had nothing to act on
    pub fn is_unprocessable(&self) -> bool {
        matches!(self, Self::NothingToMint)
    }

    /// Check if an upstream dependency (feed, chain, signer) failed
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::SignerUnreachable { .. } | Self::SignerRejected { .. }
        )
    }
}
