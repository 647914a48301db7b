// Path: crates/crypto/src/sign/mldsa/mod.rs
//! ML-DSA-65 (Module-Lattice-Based Digital Signature Algorithm, FIPS 204).
//!
//! The stored private form is the 32-byte ξ seed: the FIPS 204 key expansion
//! is deterministic, so the expanded signing key and the public key are both
//! derivable on demand and the large expanded form never leaves this module.
//! Signing uses the deterministic variant with an empty context string.

use crate::error::CryptoError;
use ml_dsa::{KeyGen, MlDsa65};
use rand::rngs::OsRng;
use rand::RngCore;
use signature::Verifier;
use sorcha_api::crypto::{
    DerivePublic, SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
};
use zeroize::Zeroizing;

/// ξ seed length (the stored private key form).
pub const MLDSA65_SEED_LEN: usize = 32;
/// Encoded public key length.
pub const MLDSA65_PUBLIC_KEY_LEN: usize = 1952;
/// Encoded signature length.
pub const MLDSA65_SIGNATURE_LEN: usize = 3309;

/// ML-DSA-65 key pair
pub struct MlDsa65KeyPair {
    public_key: MlDsa65PublicKey,
    private_key: MlDsa65PrivateKey,
}

/// ML-DSA-65 public key
#[derive(Clone)]
pub struct MlDsa65PublicKey(ml_dsa::VerifyingKey<MlDsa65>);

/// ML-DSA-65 private key (ξ seed)
pub struct MlDsa65PrivateKey {
    seed: Zeroizing<[u8; MLDSA65_SEED_LEN]>,
}

/// ML-DSA-65 signature
pub struct MlDsa65Signature(ml_dsa::Signature<MlDsa65>);

impl MlDsa65KeyPair {
    /// Generate a new key pair from the system CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut seed = Zeroizing::new([0u8; MLDSA65_SEED_LEN]);
        OsRng
            .try_fill_bytes(&mut *seed)
            .map_err(|e| CryptoError::KeyGenFailed(format!("system CSPRNG unavailable: {e}")))?;
        let private_key = MlDsa65PrivateKey { seed };
        let public_key = private_key.derive_public()?;
        Ok(Self {
            public_key,
            private_key,
        })
    }

    /// Rebuild a key pair from a stored seed.
    pub fn from_private_key(private_key: &MlDsa65PrivateKey) -> Result<Self, CryptoError> {
        let private_key = MlDsa65PrivateKey {
            seed: private_key.seed.clone(),
        };
        let public_key = private_key.derive_public()?;
        Ok(Self {
            public_key,
            private_key,
        })
    }
}

impl SigningKeyPair for MlDsa65KeyPair {
    type PublicKey = MlDsa65PublicKey;
    type PrivateKey = MlDsa65PrivateKey;
    type Signature = MlDsa65Signature;

    fn public_key(&self) -> Self::PublicKey {
        self.public_key.clone()
    }

    fn private_key(&self) -> Self::PrivateKey {
        MlDsa65PrivateKey {
            seed: self.private_key.seed.clone(),
        }
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        self.private_key.sign(message)
    }
}

impl MlDsa65PrivateKey {
    fn expand(&self) -> ml_dsa::KeyPair<MlDsa65> {
        MlDsa65::key_gen_internal(&(*self.seed).into())
    }
}

impl SigningKey for MlDsa65PrivateKey {
    type Signature = MlDsa65Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        let expanded = self.expand();
        let signature = expanded
            .signing_key()
            .sign_deterministic(message, &[])
            .map_err(|e| CryptoError::SigningFailed(format!("ml-dsa-65: {e}")))?;
        Ok(MlDsa65Signature(signature))
    }
}

impl DerivePublic for MlDsa65PrivateKey {
    type PublicKey = MlDsa65PublicKey;

    fn derive_public(&self) -> Result<Self::PublicKey, CryptoError> {
        Ok(MlDsa65PublicKey(self.expand().verifying_key().clone()))
    }
}

impl VerifyingKey for MlDsa65PublicKey {
    type Signature = MlDsa65Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        self.0
            .verify(message, &signature.0)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl SerializableKey for MlDsa65PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.encode().as_slice().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let encoded: ml_dsa::EncodedVerifyingKey<MlDsa65> = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length(MLDSA65_PUBLIC_KEY_LEN, bytes.len()))?;
        Ok(MlDsa65PublicKey(ml_dsa::VerifyingKey::decode(&encoded)))
    }
}

impl SerializableKey for MlDsa65PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.seed.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; MLDSA65_SEED_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length(MLDSA65_SEED_LEN, bytes.len()))?;
        Ok(MlDsa65PrivateKey {
            seed: Zeroizing::new(seed),
        })
    }
}

impl SerializableKey for MlDsa65Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.encode().as_slice().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let encoded: ml_dsa::EncodedSignature<MlDsa65> = bytes
            .try_into()
            .map_err(|_| {
                CryptoError::parameter_length("signature", MLDSA65_SIGNATURE_LEN, bytes.len())
            })?;
        ml_dsa::Signature::decode(&encoded)
            .map(MlDsa65Signature)
            .ok_or(CryptoError::InvalidSignature)
    }
}

impl Signature for MlDsa65Signature {}

#[cfg(test)]
mod tests;
