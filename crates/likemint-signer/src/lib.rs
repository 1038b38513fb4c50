//! # likemint-signer
//!
//! One attestation signer. The API server never tells a signer what to
//! sign: it sends `(reactorId, targetId, targetAddress)` and the signer
//! resolves the identity, scans the feed, reads the boundary, and builds
//! the mint arguments itself before signing them with its own key.

pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::SignerError;
pub use server::{create_app, create_state, run};
pub use state::SignerState;
