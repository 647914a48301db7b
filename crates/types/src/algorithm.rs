// Path: crates/types/src/algorithm.rs
//! The algorithm registry.
//!
//! Every key, signature, ciphertext and digest in the core travels with an
//! [`AlgorithmTag`]. The tag names use the published standard identifiers
//! (FIPS 203/204/205 for the post-quantum families) and are the values that
//! appear in serialized containers, so they are stable wire strings.

use crate::error::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the algorithms the core implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlgorithmTag {
    /// Ed25519 (RFC 8032 / RFC 9381 family).
    #[serde(rename = "Ed25519")]
    Ed25519,
    /// ECDSA over NIST P-256 with SHA-256.
    #[serde(rename = "NIST-P256")]
    NistP256,
    /// RSA-4096 with PKCS#1 v1.5 padding over SHA-256.
    #[serde(rename = "RSA-4096")]
    Rsa4096,
    /// ML-DSA-65 (FIPS 204).
    #[serde(rename = "ML-DSA-65")]
    MlDsa65,
    /// SLH-DSA-SHA2-128s (FIPS 205).
    #[serde(rename = "SLH-DSA-128s")]
    SlhDsa128s,
    /// SLH-DSA-SHA2-192s (FIPS 205).
    #[serde(rename = "SLH-DSA-192s")]
    SlhDsa192s,
    /// ML-KEM-768 (FIPS 203).
    #[serde(rename = "ML-KEM-768")]
    MlKem768,
    /// BLS signatures over BLS12-381 (signatures in G1, keys in G2).
    #[serde(rename = "BLS12-381")]
    Bls12381,
    /// XChaCha20-Poly1305 AEAD.
    #[serde(rename = "XChaCha20-Poly1305")]
    XChaCha20Poly1305,
    /// SHA-256.
    #[serde(rename = "SHA-256")]
    Sha256,
    /// SHA-384.
    #[serde(rename = "SHA-384")]
    Sha384,
    /// SHA-512.
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl AlgorithmTag {
    /// The canonical wire name of the algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519",
            Self::NistP256 => "NIST-P256",
            Self::Rsa4096 => "RSA-4096",
            Self::MlDsa65 => "ML-DSA-65",
            Self::SlhDsa128s => "SLH-DSA-128s",
            Self::SlhDsa192s => "SLH-DSA-192s",
            Self::MlKem768 => "ML-KEM-768",
            Self::Bls12381 => "BLS12-381",
            Self::XChaCha20Poly1305 => "XChaCha20-Poly1305",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// True for the classical (pre-quantum) signature algorithms.
    pub fn is_classical_signature(&self) -> bool {
        matches!(self, Self::Ed25519 | Self::NistP256 | Self::Rsa4096)
    }

    /// True for the NIST post-quantum signature algorithms.
    pub fn is_pqc_signature(&self) -> bool {
        matches!(self, Self::MlDsa65 | Self::SlhDsa128s | Self::SlhDsa192s)
    }

    /// True for any algorithm that can produce a signature.
    pub fn is_signature(&self) -> bool {
        self.is_classical_signature() || self.is_pqc_signature() || *self == Self::Bls12381
    }

    /// True for key-encapsulation algorithms.
    pub fn is_kem(&self) -> bool {
        matches!(self, Self::MlKem768)
    }

    /// True for hash algorithms.
    pub fn is_hash(&self) -> bool {
        matches!(self, Self::Sha256 | Self::Sha384 | Self::Sha512)
    }

    /// The fixed signature length in bytes, where the algorithm has one.
    pub fn signature_len(&self) -> Option<usize> {
        match self {
            Self::Ed25519 => Some(64),
            Self::NistP256 => Some(64),
            Self::Rsa4096 => Some(512),
            Self::MlDsa65 => Some(3309),
            Self::SlhDsa128s => Some(7856),
            Self::SlhDsa192s => Some(16_224),
            Self::Bls12381 => Some(48),
            _ => None,
        }
    }

    /// The fixed public key length in bytes, where the algorithm has one.
    ///
    /// RSA public keys are DER-encoded and variable-length, so `Rsa4096`
    /// returns `None`.
    pub fn public_key_len(&self) -> Option<usize> {
        match self {
            Self::Ed25519 => Some(32),
            Self::NistP256 => Some(33),
            Self::MlDsa65 => Some(1952),
            Self::SlhDsa128s => Some(32),
            Self::SlhDsa192s => Some(48),
            Self::MlKem768 => Some(1184),
            Self::Bls12381 => Some(96),
            _ => None,
        }
    }

    /// The digest length in bytes for hash algorithms.
    pub fn digest_len(&self) -> Option<usize> {
        match self {
            Self::Sha256 => Some(32),
            Self::Sha384 => Some(48),
            Self::Sha512 => Some(64),
            _ => None,
        }
    }
}

impl fmt::Display for AlgorithmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmTag {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ed25519" => Ok(Self::Ed25519),
            "NIST-P256" => Ok(Self::NistP256),
            "RSA-4096" => Ok(Self::Rsa4096),
            "ML-DSA-65" => Ok(Self::MlDsa65),
            "SLH-DSA-128s" => Ok(Self::SlhDsa128s),
            "SLH-DSA-192s" => Ok(Self::SlhDsa192s),
            "ML-KEM-768" => Ok(Self::MlKem768),
            "BLS12-381" => Ok(Self::Bls12381),
            "XChaCha20-Poly1305" => Ok(Self::XChaCha20Poly1305),
            "SHA-256" => Ok(Self::Sha256),
            "SHA-384" => Ok(Self::Sha384),
            "SHA-512" => Ok(Self::Sha512),
            other => Err(CryptoError::Unsupported(other.to_string())),
        }
    }
}
