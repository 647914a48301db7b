// Path: crates/crypto/src/sign/eddsa/mod.rs
//! Ed25519 signatures.

use crate::error::CryptoError;
use ed25519_dalek as dalek;
use ed25519_dalek::{Signer, Verifier};
use rand::rngs::OsRng;
use sorcha_api::crypto::{
    DerivePublic, SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
};

/// Ed25519 seed / public key length.
pub const ED25519_KEY_LEN: usize = 32;
/// Ed25519 signature length.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Ed25519 key pair implementation
#[derive(Clone)]
pub struct Ed25519KeyPair {
    signing_key: dalek::SigningKey,
}

/// Ed25519 signature implementation
pub struct Ed25519Signature(dalek::Signature);

/// Ed25519 public key implementation
#[derive(Clone)]
pub struct Ed25519PublicKey(dalek::VerifyingKey);

/// Ed25519 private key implementation
pub struct Ed25519PrivateKey(dalek::SigningKey);

impl Ed25519KeyPair {
    /// Generate a new Ed25519 key pair
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = OsRng;
        Ok(Self {
            signing_key: dalek::SigningKey::generate(&mut rng),
        })
    }

    /// Create from an existing private key
    pub fn from_private_key(private_key: &Ed25519PrivateKey) -> Self {
        Self {
            signing_key: private_key.0.clone(),
        }
    }
}

impl SigningKeyPair for Ed25519KeyPair {
    type PublicKey = Ed25519PublicKey;
    type PrivateKey = Ed25519PrivateKey;
    type Signature = Ed25519Signature;

    fn public_key(&self) -> Self::PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key())
    }

    fn private_key(&self) -> Self::PrivateKey {
        Ed25519PrivateKey(self.signing_key.clone())
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Ok(Ed25519Signature(self.signing_key.sign(message)))
    }
}

impl VerifyingKey for Ed25519PublicKey {
    type Signature = Ed25519Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        self.0
            .verify(message, &signature.0)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl SerializableKey for Ed25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; ED25519_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length(ED25519_KEY_LEN, bytes.len()))?;
        dalek::VerifyingKey::from_bytes(&arr)
            .map(Ed25519PublicKey)
            .map_err(|_| CryptoError::InvalidKey("not a valid Ed25519 point".into()))
    }
}

impl SigningKey for Ed25519PrivateKey {
    type Signature = Ed25519Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Ok(Ed25519Signature(self.0.sign(message)))
    }
}

impl DerivePublic for Ed25519PrivateKey {
    type PublicKey = Ed25519PublicKey;

    fn derive_public(&self) -> Result<Self::PublicKey, CryptoError> {
        Ok(Ed25519PublicKey(self.0.verifying_key()))
    }
}

impl SerializableKey for Ed25519PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        // Export just the seed (32 bytes)
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; ED25519_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length(ED25519_KEY_LEN, bytes.len()))?;
        Ok(Ed25519PrivateKey(dalek::SigningKey::from_bytes(&seed)))
    }
}

impl SerializableKey for Ed25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; ED25519_SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::parameter_length("signature", ED25519_SIGNATURE_LEN, bytes.len()))?;
        Ok(Ed25519Signature(dalek::Signature::from_bytes(&arr)))
    }
}

impl Signature for Ed25519Signature {}
