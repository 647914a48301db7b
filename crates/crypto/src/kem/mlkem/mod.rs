// Path: crates/crypto/src/kem/mlkem/mod.rs
//! ML-KEM-768 key encapsulation (FIPS 203).
//!
//! Decapsulation performs *implicit rejection*: a ciphertext that does not
//! match the key yields a pseudorandom shared secret, never an error. Callers
//! that need a wrong-key signal get it from the AEAD layer in
//! [`crate::kem::envelope`].

use crate::error::CryptoError;
use ml_kem::kem::{Decapsulate, Encapsulate};
use ml_kem::{EncodedSizeUser, KemCore, MlKem768};
use rand::rngs::OsRng;
use sorcha_api::crypto::{
    DecapsulationKey, Encapsulated, EncapsulationKey, KemKeyPair, KeyEncapsulation, SerializableKey,
};
use zeroize::Zeroizing;

/// Encapsulation key length.
pub const MLKEM768_PUBLIC_KEY_LEN: usize = 1184;
/// Decapsulation key length.
pub const MLKEM768_PRIVATE_KEY_LEN: usize = 2400;
/// Ciphertext length.
pub const MLKEM768_CIPHERTEXT_LEN: usize = 1088;
/// Shared secret length.
pub const MLKEM768_SHARED_SECRET_LEN: usize = 32;

// FIPS 203 decapsulation key layout: dk_PKE(1152) ‖ ek(1184) ‖ H(ek)(32) ‖ z(32).
const EK_OFFSET_IN_DK: usize = 1152;

/// ML-KEM-768 key encapsulation mechanism
#[derive(Default)]
pub struct MlKem768Kem;

/// ML-KEM-768 key pair
pub struct MlKem768KeyPair {
    /// Public key
    pub public_key: MlKem768PublicKey,
    /// Private key
    pub private_key: MlKem768PrivateKey,
}

/// ML-KEM-768 public (encapsulation) key wrapper
#[derive(Clone)]
pub struct MlKem768PublicKey {
    inner: <MlKem768 as KemCore>::EncapsulationKey,
}

/// ML-KEM-768 private (decapsulation) key wrapper
#[derive(Clone)]
pub struct MlKem768PrivateKey {
    inner: <MlKem768 as KemCore>::DecapsulationKey,
}

/// ML-KEM-768 encapsulated key
pub struct MlKem768Encapsulated {
    /// The ciphertext bytes
    ciphertext: Vec<u8>,
    /// The shared secret
    shared_secret: Zeroizing<Vec<u8>>,
}

impl MlKem768Kem {
    /// Create a new provider
    pub fn new() -> Self {
        Self
    }
}

impl KeyEncapsulation for MlKem768Kem {
    type KeyPair = MlKem768KeyPair;
    type PublicKey = MlKem768PublicKey;
    type PrivateKey = MlKem768PrivateKey;
    type Encapsulated = MlKem768Encapsulated;

    fn generate_keypair(&self) -> Result<Self::KeyPair, CryptoError> {
        let mut rng = OsRng;
        let (dk, ek) = MlKem768::generate(&mut rng);
        Ok(MlKem768KeyPair {
            public_key: MlKem768PublicKey { inner: ek },
            private_key: MlKem768PrivateKey { inner: dk },
        })
    }

    fn encapsulate(&self, public_key: &Self::PublicKey) -> Result<Self::Encapsulated, CryptoError> {
        let mut rng = OsRng;
        let (ciphertext, shared_secret) = public_key
            .inner
            .encapsulate(&mut rng)
            .map_err(|_| CryptoError::EncryptionFailed("ml-kem encapsulation".into()))?;
        Ok(MlKem768Encapsulated {
            ciphertext: ciphertext.as_slice().to_vec(),
            shared_secret: Zeroizing::new(shared_secret.as_slice().to_vec()),
        })
    }

    fn decapsulate(
        &self,
        private_key: &Self::PrivateKey,
        encapsulated: &Self::Encapsulated,
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let ciphertext: ml_kem::Ciphertext<MlKem768> = encapsulated
            .ciphertext
            .as_slice()
            .try_into()
            .map_err(|_| {
                CryptoError::parameter_length(
                    "ciphertext",
                    MLKEM768_CIPHERTEXT_LEN,
                    encapsulated.ciphertext.len(),
                )
            })?;
        let shared_secret = private_key
            .inner
            .decapsulate(&ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed)?;
        Ok(Zeroizing::new(shared_secret.as_slice().to_vec()))
    }
}

impl KemKeyPair for MlKem768KeyPair {
    type PublicKey = MlKem768PublicKey;
    type PrivateKey = MlKem768PrivateKey;

    fn public_key(&self) -> Self::PublicKey {
        self.public_key.clone()
    }

    fn private_key(&self) -> Self::PrivateKey {
        self.private_key.clone()
    }
}

impl MlKem768PrivateKey {
    /// Recompute the encapsulation key embedded in the FIPS 203 decapsulation
    /// key encoding.
    pub fn derive_public(&self) -> Result<MlKem768PublicKey, CryptoError> {
        let encoded = self.inner.as_bytes();
        let ek_bytes = encoded
            .as_slice()
            .get(EK_OFFSET_IN_DK..EK_OFFSET_IN_DK + MLKEM768_PUBLIC_KEY_LEN)
            .ok_or_else(|| CryptoError::InvalidKey("truncated decapsulation key".into()))?;
        MlKem768PublicKey::from_bytes(ek_bytes)
    }
}

impl SerializableKey for MlKem768PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.inner.as_bytes().as_slice().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let encoded: ml_kem::Encoded<<MlKem768 as KemCore>::EncapsulationKey> = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length(MLKEM768_PUBLIC_KEY_LEN, bytes.len()))?;
        Ok(Self {
            inner: <MlKem768 as KemCore>::EncapsulationKey::from_bytes(&encoded),
        })
    }
}

impl EncapsulationKey for MlKem768PublicKey {}

impl SerializableKey for MlKem768PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.inner.as_bytes().as_slice().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let encoded: ml_kem::Encoded<<MlKem768 as KemCore>::DecapsulationKey> = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length(MLKEM768_PRIVATE_KEY_LEN, bytes.len()))?;
        Ok(Self {
            inner: <MlKem768 as KemCore>::DecapsulationKey::from_bytes(&encoded),
        })
    }
}

impl DecapsulationKey for MlKem768PrivateKey {}

impl SerializableKey for MlKem768Encapsulated {
    fn to_bytes(&self) -> Vec<u8> {
        self.ciphertext.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != MLKEM768_CIPHERTEXT_LEN {
            return Err(CryptoError::parameter_length(
                "ciphertext",
                MLKEM768_CIPHERTEXT_LEN,
                bytes.len(),
            ));
        }
        Ok(MlKem768Encapsulated {
            ciphertext: bytes.to_vec(),
            shared_secret: Zeroizing::new(Vec::new()),
        })
    }
}

impl Encapsulated for MlKem768Encapsulated {
    fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    fn shared_secret(&self) -> &[u8] {
        &self.shared_secret
    }
}

#[cfg(test)]
mod tests;
