// Path: crates/crypto/src/kem/envelope/mod.rs
//! Hybrid public-key encryption envelope.
//!
//! `seal` encapsulates a fresh ML-KEM-768 shared secret to the recipient and
//! uses it directly as the XChaCha20-Poly1305 key under a fresh 24-byte
//! nonce. Wire layout:
//!
//! `[ KEM ciphertext (1088) ‖ nonce (24) ‖ AEAD ciphertext+tag ]`
//!
//! Because ML-KEM decapsulation never fails (implicit rejection), the AEAD
//! tag check is the authoritative wrong-key / tamper signal: `open` reports
//! `DecryptionFailed` and nothing more specific.

use crate::error::CryptoError;
use crate::kem::mlkem::{
    MlKem768Kem, MlKem768PrivateKey, MlKem768PublicKey, MLKEM768_CIPHERTEXT_LEN,
};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sorcha_api::crypto::{Encapsulated, KeyEncapsulation, SerializableKey};
use zeroize::Zeroizing;

/// XChaCha20-Poly1305 nonce length.
pub const NONCE_LEN: usize = 24;
/// Poly1305 tag length.
pub const TAG_LEN: usize = 16;
/// Smallest well-formed envelope: KEM ciphertext, nonce, tag over an empty
/// AEAD payload. Sealing rejects empty plaintexts, so real envelopes are
/// strictly larger.
pub const MIN_ENVELOPE_LEN: usize = MLKEM768_CIPHERTEXT_LEN + NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` to the holder of `recipient`'s decapsulation key.
pub fn seal(recipient: &MlKem768PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if plaintext.is_empty() {
        return Err(CryptoError::InvalidParameter("empty plaintext".into()));
    }

    let kem = MlKem768Kem::new();
    let encapsulated = kem.encapsulate(recipient)?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| CryptoError::EncryptionFailed(format!("system CSPRNG unavailable: {e}")))?;

    let cipher = XChaCha20Poly1305::new(Key::from_slice(encapsulated.shared_secret()));
    let sealed = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::EncryptionFailed("aead seal".into()))?;

    let mut envelope =
        Vec::with_capacity(MLKEM768_CIPHERTEXT_LEN + NONCE_LEN + sealed.len());
    envelope.extend_from_slice(encapsulated.ciphertext());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&sealed);
    Ok(envelope)
}

/// Decrypt an envelope produced by [`seal`].
pub fn open(
    private_key: &MlKem768PrivateKey,
    envelope: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if envelope.len() < MIN_ENVELOPE_LEN {
        return Err(CryptoError::InvalidParameter(format!(
            "envelope too short: {} bytes, minimum {MIN_ENVELOPE_LEN}",
            envelope.len()
        )));
    }
    let (kem_ciphertext, rest) = envelope.split_at(MLKEM768_CIPHERTEXT_LEN);
    let (nonce, sealed) = rest.split_at(NONCE_LEN);

    let kem = MlKem768Kem::new();
    let encapsulated = crate::kem::mlkem::MlKem768Encapsulated::from_bytes(kem_ciphertext)?;
    // Implicit rejection: a wrong key yields a pseudorandom secret here and a
    // tag failure below.
    let shared_secret = kem.decapsulate(private_key, &encapsulated)?;

    let cipher = XChaCha20Poly1305::new(Key::from_slice(&shared_secret));
    let plaintext = cipher
        .decrypt(XNonce::from_slice(nonce), sealed)
        .map_err(|_| CryptoError::DecryptionFailed)?;
    Ok(Zeroizing::new(plaintext))
}
