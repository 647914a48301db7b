// Path: crates/crypto/src/sign/hybrid/mod.rs
//! Hybrid (classical + post-quantum) signing and verification.
//!
//! The container itself is defined in `sorcha-types`; this module produces
//! containers from key material and applies the verification policy. The two
//! halves are independent, so signing fans them out with `rayon::join`.
//!
//! Every rejection surfaces as `InvalidSignature`; which half failed, and
//! why, goes to the log only.

use crate::address::{WalletAddress, HRP_PQC};
use crate::algorithms::hash::sha256;
use crate::error::CryptoError;
use crate::sign::{derive_public_bytes, sign_bytes, verify_bytes};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sorcha_types::algorithm::AlgorithmTag;
use sorcha_types::hybrid::HybridSignature;

/// How many halves a verifier demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HybridVerificationMode {
    /// Both halves must be present and verify.
    #[default]
    Strict,
    /// Any present half that verifies is enough, provided no present half fails.
    Permissive,
}

/// Sign `message` with both halves and assemble the container.
///
/// The witness public key is derived from the PQC private key and embedded so
/// verifiers can re-check the `ws2` address binding.
pub fn hybrid_sign(
    message: &[u8],
    classical_tag: AlgorithmTag,
    classical_private_key: &[u8],
    pqc_tag: AlgorithmTag,
    pqc_private_key: &[u8],
) -> Result<HybridSignature, CryptoError> {
    if !classical_tag.is_classical_signature() {
        return Err(CryptoError::InvalidParameter(format!(
            "{classical_tag} is not a classical signature algorithm"
        )));
    }
    if !pqc_tag.is_pqc_signature() {
        return Err(CryptoError::InvalidParameter(format!(
            "{pqc_tag} is not a post-quantum signature algorithm"
        )));
    }

    // The halves share no state; produce them in parallel.
    let (classical_result, pqc_result) = rayon::join(
        || sign_bytes(classical_tag, message, classical_private_key),
        || -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
            let signature = sign_bytes(pqc_tag, message, pqc_private_key)?;
            let witness = derive_public_bytes(pqc_tag, pqc_private_key)?;
            Ok((signature, witness))
        },
    );
    let classical_signature = classical_result?;
    let (pqc_signature, witness_public_key) = pqc_result?;

    Ok(HybridSignature {
        classical: Some(BASE64.encode(classical_signature)),
        classical_algorithm: Some(classical_tag),
        pqc: Some(BASE64.encode(pqc_signature)),
        pqc_algorithm: Some(pqc_tag),
        witness_public_key: Some(BASE64.encode(witness_public_key)),
    })
}

/// Verify a hybrid container against `message`.
///
/// `classical_public_key` is required whenever a classical half is present.
/// When `expected_address` names a `ws2` address, the witness public key is
/// re-hashed and compared against the address payload before the PQC half is
/// trusted.
pub fn hybrid_verify(
    container: &HybridSignature,
    message: &[u8],
    classical_public_key: Option<&[u8]>,
    expected_address: Option<&WalletAddress>,
    mode: HybridVerificationMode,
) -> Result<(), CryptoError> {
    if !container.is_valid() {
        log::debug!("hybrid verification rejected: container fails structural validity");
        return Err(CryptoError::InvalidSignature);
    }

    if mode == HybridVerificationMode::Strict
        && (!container.has_classical() || !container.has_pqc())
    {
        log::debug!("hybrid verification rejected: strict mode requires both halves");
        return Err(CryptoError::InvalidSignature);
    }

    if container.has_classical() {
        verify_classical_half(container, message, classical_public_key)?;
    }
    if container.has_pqc() {
        verify_pqc_half(container, message, expected_address)?;
    }
    Ok(())
}

fn verify_classical_half(
    container: &HybridSignature,
    message: &[u8],
    classical_public_key: Option<&[u8]>,
) -> Result<(), CryptoError> {
    let tag = container
        .classical_algorithm
        .ok_or(CryptoError::InvalidSignature)?;
    let encoded = container
        .classical
        .as_deref()
        .ok_or(CryptoError::InvalidSignature)?;
    let signature = decode_base64(encoded, "classical signature")?;
    let Some(public_key) = classical_public_key else {
        log::debug!("hybrid verification rejected: no classical public key supplied");
        return Err(CryptoError::InvalidSignature);
    };
    verify_bytes(tag, message, &signature, public_key).map_err(|e| {
        log::debug!("hybrid classical half rejected: {e}");
        CryptoError::InvalidSignature
    })
}

fn verify_pqc_half(
    container: &HybridSignature,
    message: &[u8],
    expected_address: Option<&WalletAddress>,
) -> Result<(), CryptoError> {
    let tag = container
        .pqc_algorithm
        .ok_or(CryptoError::InvalidSignature)?;
    let encoded = container.pqc.as_deref().ok_or(CryptoError::InvalidSignature)?;
    let witness_encoded = container
        .witness_public_key
        .as_deref()
        .ok_or(CryptoError::InvalidSignature)?;
    let signature = decode_base64(encoded, "pqc signature")?;
    let witness = decode_base64(witness_encoded, "witness public key")?;

    if let Some(expected) = tag.public_key_len() {
        if witness.len() != expected {
            log::debug!(
                "hybrid pqc half rejected: witness key is {} bytes, expected {expected}",
                witness.len()
            );
            return Err(CryptoError::InvalidSignature);
        }
    }

    if let Some(address) = expected_address {
        if !witness_binds_address(address, &witness) {
            log::debug!("hybrid pqc half rejected: witness key does not match address commitment");
            return Err(CryptoError::InvalidSignature);
        }
    }

    verify_bytes(tag, message, &signature, &witness).map_err(|e| {
        log::debug!("hybrid pqc half rejected: {e}");
        CryptoError::InvalidSignature
    })
}

/// Whether a witness key is the preimage of a `ws2` address commitment.
///
/// The address payload is `SHA-256(network_tag ‖ public_key)`; an address
/// under any other HRP cannot be bound by a witness key.
pub fn witness_binds_address(address: &WalletAddress, witness_public_key: &[u8]) -> bool {
    if address.hrp != HRP_PQC {
        return false;
    }
    let mut preimage = Vec::with_capacity(1 + witness_public_key.len());
    preimage.push(address.network_tag);
    preimage.extend_from_slice(witness_public_key);
    sha256(&preimage) == address.hash
}

fn decode_base64(encoded: &str, what: &str) -> Result<Vec<u8>, CryptoError> {
    BASE64.decode(encoded).map_err(|_| {
        log::debug!("hybrid verification rejected: {what} is not valid base64");
        CryptoError::InvalidSignature
    })
}

#[cfg(test)]
mod tests;
