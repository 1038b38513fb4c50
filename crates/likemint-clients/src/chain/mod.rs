//! Chain access over Ethereum JSON-RPC
//!
//! - `rpc`: JSON-RPC envelope and quantity/data hex helpers
//! - `contract`: Solidity interface of the minting contract
//! - `client`: `ChainRpcClient`, the boundary reader and event source

mod client;
mod contract;
mod rpc;

pub use client::ChainRpcClient;
pub use contract::ILikeMint;
pub use rpc::{decode_data, decode_quantity, encode_quantity, JsonRpcClient};
