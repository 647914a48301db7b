// Path: crates/crypto/src/security.rs
//! Secret-memory hygiene.
//!
//! [`SecretBytes`] is the owning container for every piece of secret material
//! in the core (private keys, KEM shared secrets, blinding factors in byte
//! form). The buffer is wiped on every exit path, including unwinding, and
//! content comparison is constant-time.

use crate::error::CryptoError;
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An exclusively owned byte buffer that is zeroized on drop.
///
/// The type deliberately implements neither `Clone` nor `Copy`: one owner per
/// secret. Borrow the content for the duration of a single operation via
/// [`SecretBytes::expose`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes {
    bytes: Vec<u8>,
}

impl SecretBytes {
    /// Takes ownership of `bytes` as secret material.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Copies a slice into a fresh secret buffer.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Fills a fresh buffer of `len` bytes from the system CSPRNG.
    pub fn random(len: usize) -> Result<Self, CryptoError> {
        let mut bytes = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::KeyGenFailed(format!("system CSPRNG unavailable: {e}")))?;
        Ok(Self { bytes })
    }

    /// Borrows the secret content for a single operation.
    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Constant-time content equality.
    pub fn ct_eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }

    /// Explicitly wipes the buffer ahead of drop.
    pub fn wipe(&mut self) {
        self.bytes.zeroize();
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl PartialEq for SecretBytes {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other)
    }
}

impl Eq for SecretBytes {}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print content; length only.
        write!(f, "SecretBytes({} bytes)", self.bytes.len())
    }
}
