//! secp256k1 keys in Ethereum conventions

mod ethereum;

pub use ethereum::{recover_address, EthereumKey};
