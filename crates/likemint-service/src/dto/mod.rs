//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting scan results to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{ChallengeRequest, EventsQuery, MintRequest, ScanQuery, SessionRequest};

pub use responses::{
    ApiResponse, AttestResponse, ChallengeResponse, HealthChecks, HealthResponse, MintResponse,
    ReadinessResponse, ScanResponse, SessionResponse, SignerInfoResponse,
};
