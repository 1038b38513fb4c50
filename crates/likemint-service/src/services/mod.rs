//! Business logic services
//!
//! The mint pipeline is split into small pieces that are tested on their
//! own: aggregation, window filtering, argument building and attestation.
//! `ScanService` and `MintService` compose them per request.

pub mod aggregator;
pub mod attestation;
pub mod builder;
pub mod challenge;
pub mod context;
pub mod error;
pub mod events;
pub mod mint;
pub mod mirror;
pub mod readiness;
pub mod scan;
pub mod session;
pub mod window;

// Re-export all services for convenience
pub use aggregator::{ReactionAggregator, ScanAccumulator, ScanLimits};
pub use attestation::AttestationClient;
pub use builder::MintArgumentBuilder;
pub use challenge::{Challenge, ChallengeStore};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use events::EventService;
pub use mint::{MintRun, MintService, MintStage};
pub use mirror::{EventMirror, MirrorProgress};
pub use readiness::ensure_ready;
pub use scan::ScanService;
pub use session::SessionService;
pub use window::{Attribution, WindowFilter};
