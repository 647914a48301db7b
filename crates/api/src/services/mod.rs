// Path: crates/api/src/services/mod.rs
//! Collaborator interfaces supplied by non-core layers.
//!
//! The core never performs I/O. Persistence, tenant key management and policy
//! distribution live outside and are reached through these traits; the crypto
//! crate ships in-memory reference implementations for wiring and tests.

use crate::error::CryptoError;
use sorcha_types::policy::CryptoPolicy;
use zeroize::Zeroizing;

/// Persists and retrieves wrapped (encrypted) private key material.
///
/// The core hands this trait ciphertext produced by its key-wrap envelope; the
/// repository's storage semantics (durability, indexing, tenancy) are not the
/// core's concern.
pub trait KeyRepository: Send + Sync {
    /// Stores a wrapped key blob under `key_id`, replacing any previous blob.
    fn store(&self, key_id: &str, wrapped: &[u8]) -> Result<(), CryptoError>;
    /// Loads the wrapped blob for `key_id`, if present.
    fn load(&self, key_id: &str) -> Result<Option<Vec<u8>>, CryptoError>;
    /// Deletes the blob for `key_id`. Deleting an absent key is not an error.
    fn delete(&self, key_id: &str) -> Result<(), CryptoError>;
}

/// Wraps and unwraps secret material under a tenant-scoped key-encryption key.
pub trait EncryptionProvider: Send + Sync {
    /// Encrypts `plaintext` under the KEK of `tenant_id`.
    fn wrap(&self, tenant_id: &str, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;
    /// Decrypts a blob produced by [`EncryptionProvider::wrap`] for the same tenant.
    fn unwrap_key(&self, tenant_id: &str, wrapped: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError>;
}

/// Supplies the active algorithm policy at process start.
pub trait PolicyStore: Send + Sync {
    /// Returns the currently active policy. Implementations should return a
    /// validated policy; the core re-validates defensively on installation.
    fn active_policy(&self) -> Result<CryptoPolicy, CryptoError>;
}
