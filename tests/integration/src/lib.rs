//! Integration test support
//!
//! Spins up the API server and real signer services on loopback sockets.
//! Upstream collaborators (identity, feed, chain, event store) are in-memory
//! so the tests need no external services.

pub mod fixtures;
pub mod helpers;

pub use helpers::{assert_json, assert_status, TestServer, World};
