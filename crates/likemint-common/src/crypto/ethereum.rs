//! Ethereum-style signing and recovery
//!
//! Signatures are 65 bytes, `r || s || v`, with `v` in {27, 28}. Signing is
//! RFC 6979 deterministic, so the same key over the same digest always
//! yields the same signature.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use likemint_core::encoding::{keccak256, personal_digest};
use likemint_core::{Address, AttestationSignature, MintArguments};

use crate::error::AppError;

/// Offset added to the recovery id on the wire
const V_OFFSET: u8 = 27;

/// A signer's private key
#[derive(Clone)]
pub struct EthereumKey {
    key: SigningKey,
    address: Address,
}

impl EthereumKey {
    /// Parse a hex private key, with or without `0x`
    ///
    /// # Errors
    /// Returns a configuration error if the key is not a valid scalar
    pub fn from_hex(hex_key: &str) -> Result<Self, AppError> {
        let bytes = hex::decode(hex_key.trim().trim_start_matches("0x"))
            .map_err(|e| AppError::Config(format!("private key is not hex: {e}")))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| AppError::Config("private key is not a valid secp256k1 scalar".into()))?;
        Ok(Self::from_signing_key(key))
    }

    fn from_signing_key(key: SigningKey) -> Self {
        let address = address_of(key.verifying_key());
        Self { key, address }
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte hash directly (no prefixing)
    ///
    /// # Errors
    /// Returns an internal error if the signing backend fails
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<AttestationSignature, AppError> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash)
            .map_err(|e| AppError::internal(anyhow::anyhow!("signing failed: {e}")))?;

        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte() + V_OFFSET;
        Ok(AttestationSignature::new(bytes))
    }

    /// Sign the personal-message digest of `digest`, as `signMessage(bytes32)` does
    ///
    /// # Errors
    /// Returns an internal error if the signing backend fails
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<AttestationSignature, AppError> {
        self.sign_hash(&personal_digest(digest))
    }

    /// Attest a set of mint arguments
    ///
    /// # Errors
    /// Returns an internal error if the signing backend fails
    pub fn sign_mint(&self, arguments: &MintArguments) -> Result<AttestationSignature, AppError> {
        self.sign_digest(&arguments.digest())
    }
}

impl std::fmt::Debug for EthereumKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumKey")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    // Drop the 0x04 SEC1 tag; the address is the low 20 bytes of the hash.
    Address::from_word(&keccak256(&point.as_bytes()[1..]))
}

/// Recover the address that produced `signature` over `message_hash`
///
/// # Errors
/// Returns `InvalidSignature` if `v` is out of range or recovery fails
pub fn recover_address(
    message_hash: &[u8; 32],
    signature: &AttestationSignature,
) -> Result<Address, AppError> {
    let bytes = signature.as_bytes();
    let v = bytes[64]
        .checked_sub(V_OFFSET)
        .ok_or_else(|| AppError::InvalidSignature(format!("bad recovery byte {}", bytes[64])))?;
    let recovery_id = RecoveryId::from_byte(v)
        .ok_or_else(|| AppError::InvalidSignature(format!("bad recovery byte {}", bytes[64])))?;
    let sig = Signature::from_slice(&bytes[..64])
        .map_err(|e| AppError::InvalidSignature(e.to_string()))?;

    let key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|e| AppError::InvalidSignature(e.to_string()))?;
    Ok(address_of(&key))
}
