//! # likemint-core
//!
//! Domain layer containing value objects, entities, the canonical ABI encoding
//! of mint arguments, the attribution window predicate, and the traits every
//! external collaborator (identity, feed, chain, signers, mirror store) must
//! implement. This crate has no dependency on HTTP, SQL, or a runtime.

pub mod encoding;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;
pub mod window;

// Re-export commonly used types at crate root
pub use entities::{
    AttestationRequest, AttestationSignature, ChainEvent, ChainEventKind, CombinedAttestation,
    Identity, MintArguments, ReactionEvent, ReactionKind, ReactionPage, Reactor, ReactorEntry,
    ReactorTally, ScanResult, SignedAttestation,
};
pub use error::DomainError;
pub use traits::{
    BoundaryReader, ChainEventRepository, ChainEventSource, IdentityResolver, ReactionFeed,
    RepoResult, Signer,
};
pub use value_objects::{AccountId, Address, AddressParseError, Timestamp};
pub use window::is_attributable;
