//! Domain entities

mod chain_event;
mod identity;
mod mint;
mod reaction;
mod tally;

pub use chain_event::{ChainEvent, ChainEventKind};
pub use identity::Identity;
pub use mint::{
    AttestationRequest, AttestationSignature, CombinedAttestation, MintArguments, ReactorEntry,
    SignedAttestation,
};
pub use reaction::{ReactionEvent, ReactionKind, ReactionPage, Reactor};
pub use tally::{ReactorTally, ScanResult};
