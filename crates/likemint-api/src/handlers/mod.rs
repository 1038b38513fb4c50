//! Route handlers

pub mod events;
pub mod health;
pub mod mint;
pub mod scan;
pub mod session;
