//! Model → entity mappers

mod chain_event;

pub use chain_event::ChainEventInsert;
