// Path: crates/crypto/src/sign/rsa/mod.rs
//! RSA-4096 with PKCS#1 v1.5 padding over SHA-256.
//!
//! Keys cross the API boundary in DER form (PKCS#8 for the private half,
//! SPKI for the public half); signatures are the fixed 512-byte modulus-size
//! form. Kept for interoperability with estates that have not finished the
//! PQC transition; the default policy flags it deprecated.

use crate::error::CryptoError;
use rsa::pkcs1v15::{
    Signature as RsaSignatureInner, SigningKey as RsaSigningKey, VerifyingKey as RsaVerifyingKey,
};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use sorcha_api::crypto::{
    DerivePublic, SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
};

/// Modulus size in bits.
pub const RSA_MODULUS_BITS: usize = 4096;
/// Modulus / signature size in bytes.
pub const RSA_SIGNATURE_LEN: usize = 512;

/// RSA-4096 key pair implementation
#[derive(Clone)]
pub struct Rsa4096KeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

/// RSA-4096 public key implementation
#[derive(Clone)]
pub struct Rsa4096PublicKey(RsaPublicKey);

/// RSA-4096 private key implementation
pub struct Rsa4096PrivateKey(RsaPrivateKey);

/// RSA-4096 signature implementation
pub struct Rsa4096Signature(Vec<u8>);

impl Rsa4096KeyPair {
    /// Generate a new RSA-4096 key pair. This is the slowest keygen in the
    /// core by a wide margin; callers should treat it as a batch operation.
    pub fn generate() -> Result<Self, CryptoError> {
        let private_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, RSA_MODULUS_BITS)
            .map_err(|e| CryptoError::KeyGenFailed(format!("rsa keygen: {e}")))?;
        let public_key = RsaPublicKey::from(&private_key);
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Create from an existing private key
    pub fn from_private_key(private_key: &Rsa4096PrivateKey) -> Self {
        Self {
            public_key: RsaPublicKey::from(&private_key.0),
            private_key: private_key.0.clone(),
        }
    }
}

impl SigningKeyPair for Rsa4096KeyPair {
    type PublicKey = Rsa4096PublicKey;
    type PrivateKey = Rsa4096PrivateKey;
    type Signature = Rsa4096Signature;

    fn public_key(&self) -> Self::PublicKey {
        Rsa4096PublicKey(self.public_key.clone())
    }

    fn private_key(&self) -> Self::PrivateKey {
        Rsa4096PrivateKey(self.private_key.clone())
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        sign_inner(&self.private_key, message)
    }
}

fn sign_inner(key: &RsaPrivateKey, message: &[u8]) -> Result<Rsa4096Signature, CryptoError> {
    let signer = RsaSigningKey::<Sha256>::new(key.clone());
    let signature = signer
        .try_sign(message)
        .map_err(|e| CryptoError::SigningFailed(format!("rsa pkcs1v15: {e}")))?;
    Ok(Rsa4096Signature(signature.to_vec()))
}

impl VerifyingKey for Rsa4096PublicKey {
    type Signature = Rsa4096Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        let verifier = RsaVerifyingKey::<Sha256>::new(self.0.clone());
        let parsed = RsaSignatureInner::try_from(signature.0.as_slice())
            .map_err(|_| CryptoError::InvalidSignature)?;
        verifier
            .verify(message, &parsed)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl SerializableKey for Rsa4096PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        // DER document of a key this provider itself constructed; encoding
        // cannot fail for a well-formed modulus.
        self.0
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .unwrap_or_default()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key = RsaPublicKey::from_public_key_der(bytes)
            .map_err(|_| CryptoError::InvalidKey("not DER-encoded RSA SPKI".into()))?;
        if key.size() != RSA_SIGNATURE_LEN {
            return Err(CryptoError::InvalidKey(format!(
                "RSA modulus is {} bits, expected {}",
                key.size() * 8,
                RSA_MODULUS_BITS
            )));
        }
        Ok(Rsa4096PublicKey(key))
    }
}

impl SigningKey for Rsa4096PrivateKey {
    type Signature = Rsa4096Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        sign_inner(&self.0, message)
    }
}

impl DerivePublic for Rsa4096PrivateKey {
    type PublicKey = Rsa4096PublicKey;

    fn derive_public(&self) -> Result<Self::PublicKey, CryptoError> {
        Ok(Rsa4096PublicKey(RsaPublicKey::from(&self.0)))
    }
}

impl SerializableKey for Rsa4096PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0
            .to_pkcs8_der()
            .map(|doc| doc.as_bytes().to_vec())
            .unwrap_or_default()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key = RsaPrivateKey::from_pkcs8_der(bytes)
            .map_err(|_| CryptoError::InvalidKey("not DER-encoded PKCS#8 RSA key".into()))?;
        if key.size() != RSA_SIGNATURE_LEN {
            return Err(CryptoError::InvalidKey(format!(
                "RSA modulus is {} bits, expected {}",
                key.size() * 8,
                RSA_MODULUS_BITS
            )));
        }
        Ok(Rsa4096PrivateKey(key))
    }
}

impl SerializableKey for Rsa4096Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != RSA_SIGNATURE_LEN {
            return Err(CryptoError::parameter_length(
                "signature",
                RSA_SIGNATURE_LEN,
                bytes.len(),
            ));
        }
        Ok(Rsa4096Signature(bytes.to_vec()))
    }
}

impl Signature for Rsa4096Signature {}

#[cfg(test)]
mod tests;
