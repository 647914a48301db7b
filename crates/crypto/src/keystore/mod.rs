// Path: crates/crypto/src/keystore/mod.rs
//! Wrapped storage for private keys at rest.
//!
//! Format V1:
//! [ Magic: "SRCH-KEY" (8) ]
//! [ Version: u16 BE (2) ]
//! [ Nonce: 24B ]
//! [ Ciphertext + Tag: N + 16 ]
//!
//! The key-encryption key is tenant-scoped and supplied by the surrounding
//! platform through the [`EncryptionProvider`] trait; this module ships an
//! in-memory reference implementation for wiring and tests, plus an
//! in-memory [`KeyRepository`]. Wrapped payloads carry the algorithm tag so
//! a loaded key rehydrates as a typed [`PrivateKey`].

use crate::error::CryptoError;
use crate::keys::PrivateKey;
use crate::security::SecretBytes;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sorcha_api::services::{EncryptionProvider, KeyRepository};
use sorcha_types::algorithm::AlgorithmTag;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;
use zeroize::Zeroizing;

// Header constants
const HEADER_MAGIC: &[u8; 8] = b"SRCH-KEY";
const HEADER_VERSION: u16 = 1;
const NONCE_LEN: usize = 24;
const HEADER_LEN: usize = 8 + 2 + NONCE_LEN; // 34 bytes
const KEK_LEN: usize = 32;

/// Seal `plaintext` under a raw 32-byte KEK in the V1 format.
fn wrap_with_kek(kek: &[u8; KEK_LEN], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CryptoError::EncryptionFailed(format!("system CSPRNG unavailable: {e}")))?;

    let cipher = XChaCha20Poly1305::new(Key::from_slice(kek));
    let sealed = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::EncryptionFailed("key wrap".into()))?;

    let mut output = Vec::with_capacity(HEADER_LEN + sealed.len());
    output.extend_from_slice(HEADER_MAGIC);
    output.extend_from_slice(&HEADER_VERSION.to_be_bytes());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&sealed);
    Ok(output)
}

/// Open a V1 blob under a raw 32-byte KEK.
fn unwrap_with_kek(
    kek: &[u8; KEK_LEN],
    wrapped: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if wrapped.len() < HEADER_LEN + 16 {
        return Err(CryptoError::InvalidParameter("wrapped key too short".into()));
    }
    let (magic, rest) = wrapped.split_at(8);
    if magic != HEADER_MAGIC {
        return Err(CryptoError::InvalidEncoding("bad key-wrap signature".into()));
    }
    let (version_bytes, rest) = rest.split_at(2);
    let version = u16::from_be_bytes(
        version_bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidEncoding("bad key-wrap header".into()))?,
    );
    if version != HEADER_VERSION {
        return Err(CryptoError::Unsupported(format!(
            "key-wrap format version {version}"
        )));
    }
    let (nonce, sealed) = rest.split_at(NONCE_LEN);

    let cipher = XChaCha20Poly1305::new(Key::from_slice(kek));
    let plaintext = cipher
        .decrypt(XNonce::from_slice(nonce), sealed)
        .map_err(|_| CryptoError::DecryptionFailed)?;
    Ok(Zeroizing::new(plaintext))
}

/// In-memory tenant KEK table implementing [`EncryptionProvider`].
#[derive(Default)]
pub struct InMemoryEncryptionProvider {
    keks: RwLock<HashMap<String, Zeroizing<[u8; KEK_LEN]>>>,
}

impl InMemoryEncryptionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a fresh random KEK for `tenant_id`.
    pub fn provision_tenant(&self, tenant_id: &str) -> Result<(), CryptoError> {
        let mut kek = Zeroizing::new([0u8; KEK_LEN]);
        OsRng
            .try_fill_bytes(&mut *kek)
            .map_err(|e| CryptoError::KeyGenFailed(format!("system CSPRNG unavailable: {e}")))?;
        self.keks
            .write()
            .map_err(|_| CryptoError::EncryptionFailed("tenant table poisoned".into()))?
            .insert(tenant_id.to_string(), kek);
        Ok(())
    }

    fn kek_for(&self, tenant_id: &str) -> Result<Zeroizing<[u8; KEK_LEN]>, CryptoError> {
        self.keks
            .read()
            .map_err(|_| CryptoError::EncryptionFailed("tenant table poisoned".into()))?
            .get(tenant_id)
            .cloned()
            .ok_or_else(|| CryptoError::InvalidParameter(format!("unknown tenant: {tenant_id}")))
    }
}

impl EncryptionProvider for InMemoryEncryptionProvider {
    fn wrap(&self, tenant_id: &str, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let kek = self.kek_for(tenant_id)?;
        wrap_with_kek(&kek, plaintext)
    }

    fn unwrap_key(
        &self,
        tenant_id: &str,
        wrapped: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let kek = self.kek_for(tenant_id)?;
        unwrap_with_kek(&kek, wrapped)
    }
}

/// In-memory blob store implementing [`KeyRepository`].
#[derive(Default)]
pub struct InMemoryKeyRepository {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyRepository for InMemoryKeyRepository {
    fn store(&self, key_id: &str, wrapped: &[u8]) -> Result<(), CryptoError> {
        self.blobs
            .write()
            .map_err(|_| CryptoError::EncryptionFailed("repository poisoned".into()))?
            .insert(key_id.to_string(), wrapped.to_vec());
        Ok(())
    }

    fn load(&self, key_id: &str) -> Result<Option<Vec<u8>>, CryptoError> {
        Ok(self
            .blobs
            .read()
            .map_err(|_| CryptoError::EncryptionFailed("repository poisoned".into()))?
            .get(key_id)
            .cloned())
    }

    fn delete(&self, key_id: &str) -> Result<(), CryptoError> {
        self.blobs
            .write()
            .map_err(|_| CryptoError::EncryptionFailed("repository poisoned".into()))?
            .remove(key_id);
        Ok(())
    }
}

/// Typed key storage over a repository and an encryption provider.
pub struct KeyStore<R, E> {
    repository: R,
    encryption: E,
}

impl<R: KeyRepository, E: EncryptionProvider> KeyStore<R, E> {
    pub fn new(repository: R, encryption: E) -> Self {
        Self {
            repository,
            encryption,
        }
    }

    /// Wrap and persist a private key. The algorithm tag travels inside the
    /// sealed payload: `[ tag_len(1) ‖ tag_name ‖ key_bytes ]`.
    pub fn store_private_key(
        &self,
        key_id: &str,
        tenant_id: &str,
        key: &PrivateKey,
    ) -> Result<(), CryptoError> {
        let tag_name = key.tag().as_str().as_bytes();
        let mut payload =
            Zeroizing::new(Vec::with_capacity(1 + tag_name.len() + key.expose().len()));
        payload.push(tag_name.len() as u8);
        payload.extend_from_slice(tag_name);
        payload.extend_from_slice(key.expose());

        let wrapped = self.encryption.wrap(tenant_id, &payload)?;
        self.repository.store(key_id, &wrapped)
    }

    /// Load and unwrap a private key. `Ok(None)` when the id is unknown.
    pub fn load_private_key(
        &self,
        key_id: &str,
        tenant_id: &str,
    ) -> Result<Option<PrivateKey>, CryptoError> {
        let Some(wrapped) = self.repository.load(key_id)? else {
            return Ok(None);
        };
        let payload = self.encryption.unwrap_key(tenant_id, &wrapped)?;
        let (tag_len, rest) = payload
            .split_first()
            .ok_or_else(|| CryptoError::InvalidEncoding("empty key payload".into()))?;
        if rest.len() <= *tag_len as usize {
            return Err(CryptoError::InvalidEncoding("truncated key payload".into()));
        }
        let (tag_name, key_bytes) = rest.split_at(*tag_len as usize);
        let tag_name = std::str::from_utf8(tag_name)
            .map_err(|_| CryptoError::InvalidEncoding("malformed tag name".into()))?;
        let tag = AlgorithmTag::from_str(tag_name)?;
        let key = PrivateKey::new(tag, SecretBytes::from_slice(key_bytes))?;
        Ok(Some(key))
    }

    /// Remove a key. Deleting an unknown id is not an error.
    pub fn delete_private_key(&self, key_id: &str) -> Result<(), CryptoError> {
        self.repository.delete(key_id)
    }
}
