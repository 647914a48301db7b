// Path: crates/crypto/src/sign/mod.rs
//! Signature providers and the byte-level algorithm dispatch.
//!
//! Each submodule implements one algorithm family behind the `sorcha-api`
//! traits. The free functions here fan out by [`AlgorithmTag`] on plain byte
//! inputs; the façade, the hybrid verifier and the batch verifier all route
//! through them so key parsing and length checks happen in exactly one place.

use crate::error::CryptoError;
use sorcha_api::crypto::{DerivePublic, SerializableKey, SigningKey, SigningKeyPair, VerifyingKey};
use sorcha_types::algorithm::AlgorithmTag;
use zeroize::Zeroizing;

pub mod batch;
pub mod bls;
pub mod ecdsa;
pub mod eddsa;
pub mod hybrid;
pub mod mldsa;
pub mod rsa;
pub mod slhdsa;

/// Generate a key pair for `tag`, returning `(public, private)` encodings.
pub fn generate_keypair_bytes(
    tag: AlgorithmTag,
) -> Result<(Vec<u8>, Zeroizing<Vec<u8>>), CryptoError> {
    match tag {
        AlgorithmTag::Ed25519 => {
            let pair = eddsa::Ed25519KeyPair::generate()?;
            Ok((
                pair.public_key().to_bytes(),
                Zeroizing::new(pair.private_key().to_bytes()),
            ))
        }
        AlgorithmTag::NistP256 => {
            let pair = ecdsa::P256KeyPair::generate()?;
            Ok((
                pair.public_key().to_bytes(),
                Zeroizing::new(pair.private_key().to_bytes()),
            ))
        }
        AlgorithmTag::Rsa4096 => {
            let pair = rsa::Rsa4096KeyPair::generate()?;
            Ok((
                pair.public_key().to_bytes(),
                Zeroizing::new(pair.private_key().to_bytes()),
            ))
        }
        AlgorithmTag::MlDsa65 => {
            let pair = mldsa::MlDsa65KeyPair::generate()?;
            Ok((
                pair.public_key().to_bytes(),
                Zeroizing::new(pair.private_key().to_bytes()),
            ))
        }
        AlgorithmTag::SlhDsa128s => {
            let pair = slhdsa::SlhDsaScheme::new(slhdsa::SlhDsaVariant::Slh128s)
                .generate_keypair()?;
            Ok((
                pair.public_key().to_bytes(),
                Zeroizing::new(pair.private_key().to_bytes()),
            ))
        }
        AlgorithmTag::SlhDsa192s => {
            let pair = slhdsa::SlhDsaScheme::new(slhdsa::SlhDsaVariant::Slh192s)
                .generate_keypair()?;
            Ok((
                pair.public_key().to_bytes(),
                Zeroizing::new(pair.private_key().to_bytes()),
            ))
        }
        AlgorithmTag::Bls12381 => {
            let pair = bls::BlsKeyPair::generate()?;
            Ok((
                pair.public_key().to_bytes(),
                Zeroizing::new(pair.private_key().to_bytes()),
            ))
        }
        other => Err(CryptoError::Unsupported(format!(
            "{other} is not a signature algorithm"
        ))),
    }
}

/// Sign `message` under `tag` with an encoded private key.
pub fn sign_bytes(
    tag: AlgorithmTag,
    message: &[u8],
    private_key: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    match tag {
        AlgorithmTag::Ed25519 => {
            let key = eddsa::Ed25519PrivateKey::from_bytes(private_key)?;
            Ok(key.sign(message)?.to_bytes())
        }
        AlgorithmTag::NistP256 => {
            let key = ecdsa::P256PrivateKey::from_bytes(private_key)?;
            Ok(key.sign(message)?.to_bytes())
        }
        AlgorithmTag::Rsa4096 => {
            let key = rsa::Rsa4096PrivateKey::from_bytes(private_key)?;
            Ok(key.sign(message)?.to_bytes())
        }
        AlgorithmTag::MlDsa65 => {
            let key = mldsa::MlDsa65PrivateKey::from_bytes(private_key)?;
            Ok(key.sign(message)?.to_bytes())
        }
        AlgorithmTag::SlhDsa128s | AlgorithmTag::SlhDsa192s => {
            let key = slhdsa::SlhDsaPrivateKey::from_bytes(private_key)?;
            if key.variant().tag() != tag {
                return Err(CryptoError::InvalidKey(format!("key is not {tag} material")));
            }
            Ok(key.sign(message)?.to_bytes())
        }
        AlgorithmTag::Bls12381 => {
            let key = bls::BlsPrivateKey::from_bytes(private_key)?;
            Ok(key.sign(message)?.to_bytes())
        }
        other => Err(CryptoError::Unsupported(format!(
            "{other} is not a signature algorithm"
        ))),
    }
}

/// Verify an encoded signature under `tag`.
pub fn verify_bytes(
    tag: AlgorithmTag,
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
) -> Result<(), CryptoError> {
    if let Some(expected) = tag.signature_len() {
        if signature.len() != expected {
            return Err(CryptoError::parameter_length(
                "signature",
                expected,
                signature.len(),
            ));
        }
    }
    match tag {
        AlgorithmTag::Ed25519 => {
            let key = eddsa::Ed25519PublicKey::from_bytes(public_key)?;
            key.verify(message, &eddsa::Ed25519Signature::from_bytes(signature)?)
        }
        AlgorithmTag::NistP256 => {
            let key = ecdsa::P256PublicKey::from_bytes(public_key)?;
            key.verify(message, &ecdsa::P256Signature::from_bytes(signature)?)
        }
        AlgorithmTag::Rsa4096 => {
            let key = rsa::Rsa4096PublicKey::from_bytes(public_key)?;
            key.verify(message, &rsa::Rsa4096Signature::from_bytes(signature)?)
        }
        AlgorithmTag::MlDsa65 => {
            let key = mldsa::MlDsa65PublicKey::from_bytes(public_key)?;
            key.verify(message, &mldsa::MlDsa65Signature::from_bytes(signature)?)
        }
        AlgorithmTag::SlhDsa128s | AlgorithmTag::SlhDsa192s => {
            let key = slhdsa::SlhDsaPublicKey::from_bytes(public_key)?;
            if key.variant().tag() != tag {
                return Err(CryptoError::InvalidKey(format!("key is not {tag} material")));
            }
            key.verify(message, &slhdsa::SlhDsaSignature::from_bytes(signature)?)
        }
        AlgorithmTag::Bls12381 => {
            let key = bls::BlsPublicKey::from_bytes(public_key)?;
            key.verify(message, &bls::BlsSignature::from_bytes(signature)?)
        }
        other => Err(CryptoError::Unsupported(format!(
            "{other} is not a signature algorithm"
        ))),
    }
}

/// Recompute the public key encoding from an encoded private key.
pub fn derive_public_bytes(tag: AlgorithmTag, private_key: &[u8]) -> Result<Vec<u8>, CryptoError> {
    match tag {
        AlgorithmTag::Ed25519 => {
            Ok(eddsa::Ed25519PrivateKey::from_bytes(private_key)?
                .derive_public()?
                .to_bytes())
        }
        AlgorithmTag::NistP256 => Ok(ecdsa::P256PrivateKey::from_bytes(private_key)?
            .derive_public()?
            .to_bytes()),
        AlgorithmTag::Rsa4096 => Ok(rsa::Rsa4096PrivateKey::from_bytes(private_key)?
            .derive_public()?
            .to_bytes()),
        AlgorithmTag::MlDsa65 => Ok(mldsa::MlDsa65PrivateKey::from_bytes(private_key)?
            .derive_public()?
            .to_bytes()),
        AlgorithmTag::SlhDsa128s | AlgorithmTag::SlhDsa192s => {
            let key = slhdsa::SlhDsaPrivateKey::from_bytes(private_key)?;
            if key.variant().tag() != tag {
                return Err(CryptoError::InvalidKey(format!("key is not {tag} material")));
            }
            Ok(key.derive_public()?.to_bytes())
        }
        AlgorithmTag::Bls12381 => Ok(bls::BlsPrivateKey::from_bytes(private_key)?
            .derive_public()?
            .to_bytes()),
        other => Err(CryptoError::Unsupported(format!(
            "{other} is not a signature algorithm"
        ))),
    }
}
