// Path: crates/crypto/src/sign/ecdsa/mod.rs
//! ECDSA over NIST P-256 with SHA-256.
//!
//! Signatures are the raw 64-byte `r ‖ s` form. Signing uses RFC 6979
//! deterministic nonces; verifiers must accept any valid signature for the
//! key regardless of nonce strategy.

use crate::error::CryptoError;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature as EcdsaSignature, SigningKey as EcdsaSigningKey, VerifyingKey as EcdsaVerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use sorcha_api::crypto::{
    DerivePublic, SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
};

/// Scalar / private key length.
pub const P256_PRIVATE_KEY_LEN: usize = 32;
/// Compressed SEC1 public key length.
pub const P256_PUBLIC_KEY_LEN: usize = 33;
/// Raw `r ‖ s` signature length.
pub const P256_SIGNATURE_LEN: usize = 64;

/// P-256 key pair implementation
#[derive(Clone)]
pub struct P256KeyPair {
    signing_key: EcdsaSigningKey,
}

/// P-256 public key implementation
#[derive(Clone)]
pub struct P256PublicKey(EcdsaVerifyingKey);

/// P-256 private key implementation
pub struct P256PrivateKey(EcdsaSigningKey);

/// P-256 signature implementation
pub struct P256Signature(EcdsaSignature);

impl P256KeyPair {
    /// Generate a new P-256 key pair
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self {
            signing_key: EcdsaSigningKey::random(&mut OsRng),
        })
    }

    /// Create from an existing private key
    pub fn from_private_key(private_key: &P256PrivateKey) -> Self {
        Self {
            signing_key: private_key.0.clone(),
        }
    }
}

impl SigningKeyPair for P256KeyPair {
    type PublicKey = P256PublicKey;
    type PrivateKey = P256PrivateKey;
    type Signature = P256Signature;

    fn public_key(&self) -> Self::PublicKey {
        let vk = self.signing_key.verifying_key();
        P256PublicKey(vk.clone())
    }

    fn private_key(&self) -> Self::PrivateKey {
        P256PrivateKey(self.signing_key.clone())
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        let signature: EcdsaSignature = self.signing_key.sign(message);
        Ok(P256Signature(signature))
    }
}

impl VerifyingKey for P256PublicKey {
    type Signature = P256Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        self.0
            .verify(message, &signature.0)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl SerializableKey for P256PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != P256_PUBLIC_KEY_LEN {
            return Err(CryptoError::key_length(P256_PUBLIC_KEY_LEN, bytes.len()));
        }
        EcdsaVerifyingKey::from_sec1_bytes(bytes)
            .map(P256PublicKey)
            .map_err(|_| CryptoError::InvalidKey("not a valid P-256 point".into()))
    }
}

impl SigningKey for P256PrivateKey {
    type Signature = P256Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        let signature: EcdsaSignature = self.0.sign(message);
        Ok(P256Signature(signature))
    }
}

impl DerivePublic for P256PrivateKey {
    type PublicKey = P256PublicKey;

    fn derive_public(&self) -> Result<Self::PublicKey, CryptoError> {
        let vk = self.0.verifying_key();
        Ok(P256PublicKey(vk.clone()))
    }
}

impl SerializableKey for P256PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != P256_PRIVATE_KEY_LEN {
            return Err(CryptoError::key_length(P256_PRIVATE_KEY_LEN, bytes.len()));
        }
        EcdsaSigningKey::from_slice(bytes)
            .map(P256PrivateKey)
            .map_err(|_| CryptoError::InvalidKey("scalar out of range for P-256".into()))
    }
}

impl SerializableKey for P256Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != P256_SIGNATURE_LEN {
            return Err(CryptoError::parameter_length(
                "signature",
                P256_SIGNATURE_LEN,
                bytes.len(),
            ));
        }
        EcdsaSignature::from_slice(bytes)
            .map(P256Signature)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl Signature for P256Signature {}

#[cfg(test)]
mod tests;
