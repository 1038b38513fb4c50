//! EIP-191 personal-message hashing

use alloy_primitives::eip191_hash_message;

/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`
pub fn personal_message_hash(message: impl AsRef<[u8]>) -> [u8; 32] {
    eip191_hash_message(message).0
}

/// Personal-message hash of a 32-byte digest, as signed by `signMessage(bytes32)`
pub fn personal_digest(digest: &[u8; 32]) -> [u8; 32] {
    personal_message_hash(digest)
}
