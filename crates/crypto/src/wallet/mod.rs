// Path: crates/crypto/src/wallet/mod.rs
//! Wallet-address binding and key-agility helpers.
//!
//! `ws1` addresses carry a classical public key: directly when the key is
//! exactly 32 bytes (Ed25519), as `SHA-256(network_tag ‖ key)` otherwise
//! (P-256, RSA DER). `ws2` addresses always carry
//! `SHA-256(network_tag ‖ pqc_public_key)`: post-quantum keys are far too
//! large to embed, so the full key travels as the *witness* inside hybrid
//! signatures and verifiers re-hash it against the address commitment.

use crate::address::{WalletAddress, HRP_CLASSICAL, HRP_PQC};
use crate::algorithms::hash::sha256;
use crate::error::CryptoError;
use crate::sign::hybrid::witness_binds_address;
use sorcha_types::algorithm::AlgorithmTag;

fn tagged_hash(network_tag: u8, public_key: &[u8]) -> [u8; 32] {
    let mut preimage = Vec::with_capacity(1 + public_key.len());
    preimage.push(network_tag);
    preimage.extend_from_slice(public_key);
    sha256(&preimage)
}

/// Build the `ws1` address for a classical public key.
pub fn classical_address(
    network_tag: u8,
    public_key: &[u8],
) -> Result<WalletAddress, CryptoError> {
    if public_key.is_empty() {
        return Err(CryptoError::InvalidKey("empty public key".into()));
    }
    let hash = if public_key.len() == 32 {
        let mut hash = [0u8; 32];
        hash.copy_from_slice(public_key);
        hash
    } else {
        tagged_hash(network_tag, public_key)
    };
    WalletAddress::new(HRP_CLASSICAL, network_tag, hash)
}

/// Build the `ws2` witness address for a post-quantum public key.
pub fn pqc_address(network_tag: u8, public_key: &[u8]) -> Result<WalletAddress, CryptoError> {
    if public_key.is_empty() {
        return Err(CryptoError::InvalidKey("empty public key".into()));
    }
    WalletAddress::new(HRP_PQC, network_tag, tagged_hash(network_tag, public_key))
}

/// Build the address appropriate to an algorithm's family.
pub fn address_for_key(
    tag: AlgorithmTag,
    network_tag: u8,
    public_key: &[u8],
) -> Result<WalletAddress, CryptoError> {
    if let Some(expected) = tag.public_key_len() {
        if public_key.len() != expected {
            return Err(CryptoError::key_length(expected, public_key.len()));
        }
    }
    if tag.is_classical_signature() {
        classical_address(network_tag, public_key)
    } else if tag.is_pqc_signature() {
        pqc_address(network_tag, public_key)
    } else {
        Err(CryptoError::Unsupported(format!(
            "{tag} does not bind a wallet address"
        )))
    }
}

/// Rotate a `ws2` address to a successor post-quantum key.
///
/// The old witness key must still match the old address commitment; the
/// successor address keeps the network tag. This is the key-agility path for
/// wallets migrating between PQC algorithms or refreshing keys.
pub fn rotate_pqc_address(
    current: &WalletAddress,
    current_public_key: &[u8],
    successor_public_key: &[u8],
) -> Result<WalletAddress, CryptoError> {
    if current.hrp != HRP_PQC {
        return Err(CryptoError::InvalidParameter(
            "only ws2 addresses rotate by witness key".into(),
        ));
    }
    if !witness_binds_address(current, current_public_key) {
        return Err(CryptoError::InvalidKey(
            "current key does not match the address commitment".into(),
        ));
    }
    pqc_address(current.network_tag, successor_public_key)
}

#[cfg(test)]
mod tests;
