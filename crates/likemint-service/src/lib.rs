//! # likemint-service
//!
//! Application layer: the scan → filter → build → attest pipeline, sessions,
//! the event mirror job, and the DTOs exchanged over HTTP.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{
    ensure_ready, AttestationClient, Attribution, Challenge, ChallengeStore, EventMirror,
    EventService, MintArgumentBuilder, MintRun, MintService, MintStage, MirrorProgress,
    ReactionAggregator, ScanAccumulator, ScanLimits, ScanService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SessionService, WindowFilter,
};
