//! # likemint-clients
//!
//! reqwest-based implementations of the collaborator traits in
//! `likemint-core`:
//!
//! - [`HubIdentityClient`]: `IdentityResolver`
//! - [`FeedClient`]: `ReactionFeed`
//! - [`ChainRpcClient`]: `BoundaryReader` and `ChainEventSource` over JSON-RPC
//! - [`HttpSignerClient`]: `Signer`
//!
//! Each client is built once at startup and shared behind an `Arc`.

pub mod chain;
pub mod feed;
pub mod http;
pub mod identity;
pub mod signer;

pub use chain::ChainRpcClient;
pub use feed::FeedClient;
pub use http::{build_client, HttpClientConfig};
pub use identity::HubIdentityClient;
pub use signer::HttpSignerClient;
