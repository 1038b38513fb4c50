//! Repository implementations
//!
//! PostgreSQL implementations of the store traits defined in likemint-core.

mod chain_event;
mod error;

pub use chain_event::PgChainEventRepository;
