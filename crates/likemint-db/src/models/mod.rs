//! Database models

mod chain_event;

pub use chain_event::ChainEventModel;
