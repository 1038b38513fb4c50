//! Value objects - immutable identifiers shared by every layer

mod account_id;
mod address;

pub use account_id::AccountId;
pub use address::{Address, AddressParseError};

/// Unix timestamp in seconds
pub type Timestamp = i64;
