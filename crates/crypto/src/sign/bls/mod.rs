// Path: crates/crypto/src/sign/bls/mod.rs
//! BLS12-381 signature algorithm.
//!
//! - Signatures in G1 (compressed 48 bytes)
//! - Public keys in G2 (compressed 96 bytes)
//! - Hashing to G1 per RFC 9380 (SSWU, `expand_message_xmd` with SHA-256)
//!
//! The threshold scheme built on these primitives lives in [`threshold`].

use crate::error::CryptoError;
use bls12_381::hash_to_curve::{ExpandMsgXmd, HashToCurve};
use bls12_381::{pairing, G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use rand::rngs::OsRng;
use sorcha_api::crypto::{
    DerivePublic, SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
};

pub mod threshold;

// Domain Separation Tag for hashing to G1
pub const BLS_DST: &[u8] = b"SORCHA_BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_";

/// Secret scalar length.
pub const BLS_PRIVATE_KEY_LEN: usize = 32;
/// Compressed G2 public key length.
pub const BLS_PUBLIC_KEY_LEN: usize = 96;
/// Compressed G1 signature length.
pub const BLS_SIGNATURE_LEN: usize = 48;

/// Deterministic, uniform map from a message to a G1 point (RFC 9380).
pub(crate) fn hash_to_g1(message: &[u8]) -> G1Projective {
    <G1Projective as HashToCurve<ExpandMsgXmd<sha2_digest09::Sha256>>>::hash_to_curve(message, BLS_DST)
}

#[derive(Clone)]
pub struct BlsKeyPair {
    public_key: BlsPublicKey,
    secret_key: BlsPrivateKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlsPublicKey(pub(crate) G2Affine);

#[derive(Clone)]
pub struct BlsPrivateKey(pub(crate) Scalar);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlsSignature(pub(crate) G1Affine);

impl BlsKeyPair {
    pub fn generate() -> Result<Self, CryptoError> {
        let secret = Scalar::random(&mut OsRng);
        let public = G2Affine::from(G2Projective::generator() * secret);
        Ok(Self {
            public_key: BlsPublicKey(public),
            secret_key: BlsPrivateKey(secret),
        })
    }
}

impl SigningKeyPair for BlsKeyPair {
    type PublicKey = BlsPublicKey;
    type PrivateKey = BlsPrivateKey;
    type Signature = BlsSignature;

    fn public_key(&self) -> Self::PublicKey {
        self.public_key.clone()
    }

    fn private_key(&self) -> Self::PrivateKey {
        self.secret_key.clone()
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        self.secret_key.sign(message)
    }
}

impl VerifyingKey for BlsPublicKey {
    type Signature = BlsSignature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        let msg_point = G1Affine::from(hash_to_g1(message));

        // e(sig, g2) == e(H(m), pk)
        let lhs = pairing(&signature.0, &G2Affine::generator());
        let rhs = pairing(&msg_point, &self.0);

        if lhs == rhs {
            Ok(())
        } else {
            Err(CryptoError::InvalidSignature)
        }
    }
}

impl SerializableKey for BlsPublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_compressed().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; BLS_PUBLIC_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length(BLS_PUBLIC_KEY_LEN, bytes.len()))?;
        Option::<G2Affine>::from(G2Affine::from_compressed(&arr))
            .map(Self)
            .ok_or_else(|| CryptoError::InvalidKey("not a valid G2 point".into()))
    }
}

impl SigningKey for BlsPrivateKey {
    type Signature = BlsSignature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        // Sig = sk * H(m)
        let sig = hash_to_g1(message) * self.0;
        Ok(BlsSignature(G1Affine::from(sig)))
    }
}

impl DerivePublic for BlsPrivateKey {
    type PublicKey = BlsPublicKey;

    fn derive_public(&self) -> Result<Self::PublicKey, CryptoError> {
        Ok(BlsPublicKey(G2Affine::from(
            G2Projective::generator() * self.0,
        )))
    }
}

impl SerializableKey for BlsPrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; BLS_PRIVATE_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length(BLS_PRIVATE_KEY_LEN, bytes.len()))?;
        Option::<Scalar>::from(Scalar::from_bytes(&arr))
            .map(Self)
            .ok_or_else(|| CryptoError::InvalidKey("scalar out of range for Fr".into()))
    }
}

impl SerializableKey for BlsSignature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_compressed().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; BLS_SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::parameter_length("signature", BLS_SIGNATURE_LEN, bytes.len()))?;
        Option::<G1Affine>::from(G1Affine::from_compressed(&arr))
            .map(Self)
            .ok_or(CryptoError::InvalidSignature)
    }
}

impl Signature for BlsSignature {}

#[cfg(test)]
mod tests;
