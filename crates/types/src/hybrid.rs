// Path: crates/types/src/hybrid.rs
//! The hybrid signature container.
//!
//! A hybrid signature carries a classical half, a post-quantum half, or both,
//! over the same message. The canonical serialization is JSON with camelCase
//! keys and absent fields omitted; binary fields are standard base64. The
//! container is a plain data type; cryptographic verification lives in
//! `sorcha-crypto`.

use crate::algorithm::AlgorithmTag;
use crate::error::CryptoError;
use serde::{Deserialize, Serialize};

/// A container combining a classical and a post-quantum signature.
///
/// The post-quantum half always travels with its *witness public key*: `ws2`
/// addresses commit to a hash of the PQC public key rather than the key
/// itself, so the full key must accompany the signature for verifiers to
/// re-derive the commitment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridSignature {
    /// Base64 classical signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classical: Option<String>,
    /// Algorithm of the classical half.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classical_algorithm: Option<AlgorithmTag>,
    /// Base64 post-quantum signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pqc: Option<String>,
    /// Algorithm of the post-quantum half.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pqc_algorithm: Option<AlgorithmTag>,
    /// Base64 public key whose hash the signer's `ws2` address commits to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witness_public_key: Option<String>,
}

impl HybridSignature {
    /// Whether the container carries any part of a classical half.
    pub fn has_classical(&self) -> bool {
        self.classical.is_some() || self.classical_algorithm.is_some()
    }

    /// Whether the container carries any part of a post-quantum half.
    pub fn has_pqc(&self) -> bool {
        self.pqc.is_some() || self.pqc_algorithm.is_some() || self.witness_public_key.is_some()
    }

    /// Structural validity.
    ///
    /// At least one half must be present. A present classical half needs both
    /// the algorithm and a non-empty signature; a present post-quantum half
    /// needs the algorithm, a non-empty signature and a non-empty witness
    /// public key.
    pub fn is_valid(&self) -> bool {
        if !self.has_classical() && !self.has_pqc() {
            return false;
        }
        if self.has_classical() {
            let sig_ok = self.classical.as_deref().is_some_and(|s| !s.is_empty());
            if !sig_ok || self.classical_algorithm.is_none() {
                return false;
            }
        }
        if self.has_pqc() {
            let sig_ok = self.pqc.as_deref().is_some_and(|s| !s.is_empty());
            let witness_ok = self
                .witness_public_key
                .as_deref()
                .is_some_and(|s| !s.is_empty());
            if !sig_ok || !witness_ok || self.pqc_algorithm.is_none() {
                return false;
            }
        }
        true
    }

    /// Detect whether a signature string is a hybrid container rather than a
    /// bare base64 signature. Base64 never begins with `{`.
    pub fn is_hybrid_format(s: &str) -> bool {
        s.starts_with('{')
    }

    /// Canonical JSON form.
    pub fn to_json(&self) -> Result<String, CryptoError> {
        serde_json::to_string(self)
            .map_err(|e| CryptoError::InvalidEncoding(format!("hybrid container: {e}")))
    }

    /// Parse the canonical JSON form.
    pub fn from_json(s: &str) -> Result<Self, CryptoError> {
        if !Self::is_hybrid_format(s) {
            return Err(CryptoError::InvalidEncoding(
                "not a hybrid signature container".into(),
            ));
        }
        serde_json::from_str(s)
            .map_err(|e| CryptoError::InvalidEncoding(format!("hybrid container: {e}")))
    }
}
