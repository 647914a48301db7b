// Path: crates/types/src/policy.rs
//! The algorithm acceptance policy.
//!
//! Deployments gate which algorithms may be used for signing, key
//! encapsulation and hashing. The policy is loaded once at process start (see
//! the `PolicyStore` trait in `sorcha-api`) and consulted as a pure function;
//! it carries no mutable state.

use crate::algorithm::AlgorithmTag;
use crate::error::CryptoError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How strictly the policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PolicyMode {
    /// Deprecated algorithms are allowed but flagged.
    Permissive,
    /// Deprecated algorithms are refused outright.
    #[default]
    Strict,
}

/// The active algorithm policy.
///
/// Validity rules: `version >= 1`, `accepted_signature ⊇ required_signature`,
/// and none of the accepted sets may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoPolicy {
    /// Monotonically increasing policy version, starting at 1.
    pub version: u32,
    /// Signature algorithms that may be used.
    pub accepted_signature: BTreeSet<AlgorithmTag>,
    /// Signature algorithms that every signer must support.
    pub required_signature: BTreeSet<AlgorithmTag>,
    /// Algorithms being phased out.
    pub deprecated: BTreeSet<AlgorithmTag>,
    /// KEM algorithms that may be used.
    pub accepted_kem: BTreeSet<AlgorithmTag>,
    /// Hash algorithms that may be used.
    pub accepted_hash: BTreeSet<AlgorithmTag>,
    /// Enforcement mode.
    pub mode: PolicyMode,
}

impl CryptoPolicy {
    /// A policy accepting everything the core implements, with the classical
    /// RSA algorithm marked deprecated. Suitable as a process default and for
    /// tests.
    pub fn permit_all() -> Self {
        let accepted_signature: BTreeSet<_> = [
            AlgorithmTag::Ed25519,
            AlgorithmTag::NistP256,
            AlgorithmTag::Rsa4096,
            AlgorithmTag::MlDsa65,
            AlgorithmTag::SlhDsa128s,
            AlgorithmTag::SlhDsa192s,
            AlgorithmTag::Bls12381,
        ]
        .into_iter()
        .collect();
        Self {
            version: 1,
            accepted_signature,
            required_signature: [AlgorithmTag::Ed25519].into_iter().collect(),
            deprecated: [AlgorithmTag::Rsa4096].into_iter().collect(),
            accepted_kem: [AlgorithmTag::MlKem768].into_iter().collect(),
            accepted_hash: [AlgorithmTag::Sha256, AlgorithmTag::Sha384, AlgorithmTag::Sha512]
                .into_iter()
                .collect(),
            mode: PolicyMode::Permissive,
        }
    }

    /// Check the structural validity rules.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.version < 1 {
            return Err(CryptoError::InvalidParameter(
                "policy version must be >= 1".into(),
            ));
        }
        if self.accepted_signature.is_empty() {
            return Err(CryptoError::InvalidParameter(
                "policy accepts no signature algorithms".into(),
            ));
        }
        if self.accepted_kem.is_empty() {
            return Err(CryptoError::InvalidParameter(
                "policy accepts no KEM algorithms".into(),
            ));
        }
        if self.accepted_hash.is_empty() {
            return Err(CryptoError::InvalidParameter(
                "policy accepts no hash algorithms".into(),
            ));
        }
        if !self.required_signature.is_subset(&self.accepted_signature) {
            return Err(CryptoError::InvalidParameter(
                "required signature algorithms must all be accepted".into(),
            ));
        }
        for tag in &self.accepted_signature {
            if !tag.is_signature() {
                return Err(CryptoError::InvalidParameter(format!(
                    "{tag} is not a signature algorithm"
                )));
            }
        }
        for tag in &self.accepted_kem {
            if !tag.is_kem() {
                return Err(CryptoError::InvalidParameter(format!(
                    "{tag} is not a KEM algorithm"
                )));
            }
        }
        for tag in &self.accepted_hash {
            if !tag.is_hash() {
                return Err(CryptoError::InvalidParameter(format!(
                    "{tag} is not a hash algorithm"
                )));
            }
        }
        Ok(())
    }

    /// Whether `tag` may be used for signing under this policy.
    ///
    /// In [`PolicyMode::Strict`] a deprecated algorithm is refused even when
    /// it is in the accepted set.
    pub fn permits_signature(&self, tag: AlgorithmTag) -> bool {
        if !self.accepted_signature.contains(&tag) {
            return false;
        }
        !(self.mode == PolicyMode::Strict && self.deprecated.contains(&tag))
    }

    /// Whether `tag` may be used for key encapsulation under this policy.
    pub fn permits_kem(&self, tag: AlgorithmTag) -> bool {
        if !self.accepted_kem.contains(&tag) {
            return false;
        }
        !(self.mode == PolicyMode::Strict && self.deprecated.contains(&tag))
    }

    /// Whether `tag` may be used for hashing under this policy.
    pub fn permits_hash(&self, tag: AlgorithmTag) -> bool {
        self.accepted_hash.contains(&tag)
    }

    /// Whether `tag` is flagged as being phased out.
    pub fn is_deprecated(&self, tag: AlgorithmTag) -> bool {
        self.deprecated.contains(&tag)
    }
}
