// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions.
//!
//! The SHA-2 facade used by every higher layer to derive challenges and
//! identifiers. Hashing is pure and stateless; the digest of empty input is
//! the well-defined standard value.

use crate::error::CryptoError;
use sha2::{Digest, Sha256, Sha384, Sha512};
use sorcha_types::algorithm::AlgorithmTag;

/// Hash function trait
pub trait HashFunction {
    /// Hash a message and return the digest
    fn hash(&self, message: &[u8]) -> Vec<u8>;

    /// Get the digest size in bytes
    fn digest_size(&self) -> usize;

    /// Get the name of the hash function
    fn name(&self) -> &str;
}

/// SHA-256 hash function implementation
#[derive(Default, Clone)]
pub struct Sha256Hash;

impl HashFunction for Sha256Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        Sha256::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        32
    }

    fn name(&self) -> &str {
        "SHA-256"
    }
}

/// SHA-384 hash function implementation
#[derive(Default, Clone)]
pub struct Sha384Hash;

impl HashFunction for Sha384Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        Sha384::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        48
    }

    fn name(&self) -> &str {
        "SHA-384"
    }
}

/// SHA-512 hash function implementation
#[derive(Default, Clone)]
pub struct Sha512Hash;

impl HashFunction for Sha512Hash {
    fn hash(&self, message: &[u8]) -> Vec<u8> {
        Sha512::digest(message).to_vec()
    }

    fn digest_size(&self) -> usize {
        64
    }

    fn name(&self) -> &str {
        "SHA-512"
    }
}

/// Look up the provider for a tagged hash algorithm.
///
/// Returns `Unsupported` for tags that are not hash algorithms.
pub fn provider(kind: AlgorithmTag) -> Result<&'static dyn HashFunction, CryptoError> {
    match kind {
        AlgorithmTag::Sha256 => Ok(&Sha256Hash),
        AlgorithmTag::Sha384 => Ok(&Sha384Hash),
        AlgorithmTag::Sha512 => Ok(&Sha512Hash),
        other => Err(CryptoError::Unsupported(format!(
            "{other} is not a hash algorithm"
        ))),
    }
}

/// Compute a digest for a tagged hash algorithm.
pub fn compute(kind: AlgorithmTag, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    Ok(provider(kind)?.hash(data))
}

// Additional convenience functions
/// Create a SHA-256 hash of any type that can be referenced as bytes
pub fn sha256<T: AsRef<[u8]>>(data: T) -> [u8; 32] {
    Sha256::digest(data.as_ref()).into()
}

/// Create a SHA-384 hash of any type that can be referenced as bytes
pub fn sha384<T: AsRef<[u8]>>(data: T) -> [u8; 48] {
    Sha384::digest(data.as_ref()).into()
}

/// Create a SHA-512 hash of any type that can be referenced as bytes
pub fn sha512<T: AsRef<[u8]>>(data: T) -> [u8; 64] {
    Sha512::digest(data.as_ref()).into()
}
