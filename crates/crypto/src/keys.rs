// Path: crates/crypto/src/keys.rs
//! Tagged key containers used by the façade.
//!
//! Providers each have their own strongly typed keys; the façade moves keys
//! across the API boundary as tagged byte containers. Private containers own
//! a [`SecretBytes`] buffer and are wiped on drop.

use crate::error::CryptoError;
use crate::security::SecretBytes;
use sorcha_types::algorithm::AlgorithmTag;

/// The stored private-key length per algorithm, where fixed.
///
/// ML-DSA-65 private keys are stored as the 32-byte FIPS 204 ξ seed (the
/// expanded form never leaves the provider), so the public half is always
/// derivable. RSA private keys are PKCS#8 DER and variable-length.
pub(crate) fn expected_private_len(tag: AlgorithmTag) -> Option<usize> {
    match tag {
        AlgorithmTag::Ed25519 => Some(32),
        AlgorithmTag::NistP256 => Some(32),
        AlgorithmTag::MlDsa65 => Some(32),
        AlgorithmTag::SlhDsa128s => Some(64),
        AlgorithmTag::SlhDsa192s => Some(96),
        AlgorithmTag::MlKem768 => Some(2400),
        AlgorithmTag::Bls12381 => Some(32),
        _ => None,
    }
}

/// A public key tagged with its algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    tag: AlgorithmTag,
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Wraps public key bytes, checking the algorithm's fixed length where
    /// one exists.
    pub fn new(tag: AlgorithmTag, bytes: Vec<u8>) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            return Err(CryptoError::InvalidKey("empty public key".into()));
        }
        if let Some(expected) = tag.public_key_len() {
            if bytes.len() != expected {
                return Err(CryptoError::key_length(expected, bytes.len()));
            }
        }
        Ok(Self { tag, bytes })
    }

    /// The algorithm this key belongs to.
    pub fn tag(&self) -> AlgorithmTag {
        self.tag
    }

    /// The encoded key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A private key tagged with its algorithm, wiped on drop.
#[derive(Debug)]
pub struct PrivateKey {
    tag: AlgorithmTag,
    bytes: SecretBytes,
}

impl PrivateKey {
    /// Wraps secret key bytes, checking the algorithm's fixed length where
    /// one exists.
    pub fn new(tag: AlgorithmTag, bytes: SecretBytes) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            return Err(CryptoError::InvalidKey("empty private key".into()));
        }
        if let Some(expected) = expected_private_len(tag) {
            if bytes.len() != expected {
                return Err(CryptoError::key_length(expected, bytes.len()));
            }
        }
        Ok(Self { tag, bytes })
    }

    /// The algorithm this key belongs to.
    pub fn tag(&self) -> AlgorithmTag {
        self.tag
    }

    /// Borrows the secret bytes for a single operation.
    pub fn expose(&self) -> &[u8] {
        self.bytes.expose()
    }
}

/// A freshly generated key pair.
///
/// Invariant: both halves carry the same tag and the public half is the
/// algorithm-specific derivation of the private half.
#[derive(Debug)]
pub struct KeySet {
    tag: AlgorithmTag,
    public_key: PublicKey,
    private_key: PrivateKey,
}

impl KeySet {
    pub(crate) fn new(
        tag: AlgorithmTag,
        public_key: PublicKey,
        private_key: PrivateKey,
    ) -> Result<Self, CryptoError> {
        if public_key.tag() != tag || private_key.tag() != tag {
            return Err(CryptoError::InvalidParameter(
                "key set halves carry mismatched algorithm tags".into(),
            ));
        }
        Ok(Self {
            tag,
            public_key,
            private_key,
        })
    }

    /// The algorithm of both halves.
    pub fn tag(&self) -> AlgorithmTag {
        self.tag
    }

    /// The public half.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The private half.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Splits the set into its halves.
    pub fn into_parts(self) -> (PublicKey, PrivateKey) {
        (self.public_key, self.private_key)
    }
}
