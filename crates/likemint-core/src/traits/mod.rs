//! Collaborator traits (ports)

mod ports;

pub use ports::{
    BoundaryReader, ChainEventRepository, ChainEventSource, IdentityResolver, ReactionFeed,
    RepoResult, Signer,
};
