// Path: crates/crypto/src/sign/slhdsa/mod.rs
//! SLH-DSA (Stateless Hash-Based Digital Signature Algorithm, FIPS 205).
//!
//! The "s" (small) SHA2 parameter sets: compact signatures, intentionally
//! slow signing. Mappings:
//! - SLH-DSA-128s -> SLH-DSA-SHA2-128s (pk 32, sk 64, sig 7856)
//! - SLH-DSA-192s -> SLH-DSA-SHA2-192s (pk 48, sk 96, sig 16224)
//!
//! The FIPS 205 private key embeds the public seed and root, so the public
//! half is always derivable from the stored private bytes.

use crate::error::CryptoError;
use rand::rngs::OsRng;
use signature::{Keypair, SignatureEncoding, Signer, Verifier};
use slh_dsa::{Sha2_128s, Sha2_192s};
use sorcha_api::crypto::{
    DerivePublic, SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey,
};
use sorcha_types::algorithm::AlgorithmTag;
use zeroize::Zeroizing;

/// The two supported parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlhDsaVariant {
    /// SLH-DSA-SHA2-128s
    Slh128s,
    /// SLH-DSA-SHA2-192s
    Slh192s,
}

impl SlhDsaVariant {
    /// Public key length in bytes.
    pub fn public_key_len(&self) -> usize {
        match self {
            Self::Slh128s => 32,
            Self::Slh192s => 48,
        }
    }

    /// Private key length in bytes.
    pub fn private_key_len(&self) -> usize {
        match self {
            Self::Slh128s => 64,
            Self::Slh192s => 96,
        }
    }

    /// Signature length in bytes.
    pub fn signature_len(&self) -> usize {
        match self {
            Self::Slh128s => 7856,
            Self::Slh192s => 16_224,
        }
    }

    /// The algorithm tag this parameter set answers to.
    pub fn tag(&self) -> AlgorithmTag {
        match self {
            Self::Slh128s => AlgorithmTag::SlhDsa128s,
            Self::Slh192s => AlgorithmTag::SlhDsa192s,
        }
    }

    fn from_public_key_len(len: usize) -> Result<Self, CryptoError> {
        match len {
            32 => Ok(Self::Slh128s),
            48 => Ok(Self::Slh192s),
            n => Err(CryptoError::InvalidKey(format!(
                "invalid SLH-DSA public key size: {n} bytes"
            ))),
        }
    }

    fn from_private_key_len(len: usize) -> Result<Self, CryptoError> {
        match len {
            64 => Ok(Self::Slh128s),
            96 => Ok(Self::Slh192s),
            n => Err(CryptoError::InvalidKey(format!(
                "invalid SLH-DSA private key size: {n} bytes"
            ))),
        }
    }
}

/// SLH-DSA signature scheme for a fixed parameter set
pub struct SlhDsaScheme {
    variant: SlhDsaVariant,
}

/// SLH-DSA key pair
pub struct SlhDsaKeyPair {
    public_key: SlhDsaPublicKey,
    private_key: SlhDsaPrivateKey,
}

/// SLH-DSA public key
#[derive(Clone)]
pub struct SlhDsaPublicKey {
    bytes: Vec<u8>,
    variant: SlhDsaVariant,
}

/// SLH-DSA private key
pub struct SlhDsaPrivateKey {
    bytes: Zeroizing<Vec<u8>>,
    variant: SlhDsaVariant,
}

/// SLH-DSA signature
pub struct SlhDsaSignature(Vec<u8>);

impl SlhDsaScheme {
    /// Create a scheme for the given parameter set
    pub fn new(variant: SlhDsaVariant) -> Self {
        Self { variant }
    }

    /// Generate a new key pair
    pub fn generate_keypair(&self) -> Result<SlhDsaKeyPair, CryptoError> {
        let mut rng = OsRng;
        let (pk_bytes, sk_bytes) = match self.variant {
            SlhDsaVariant::Slh128s => {
                let sk = slh_dsa::SigningKey::<Sha2_128s>::new(&mut rng);
                let pk = sk.verifying_key();
                (pk.to_bytes().as_slice().to_vec(), sk.to_bytes().as_slice().to_vec())
            }
            SlhDsaVariant::Slh192s => {
                let sk = slh_dsa::SigningKey::<Sha2_192s>::new(&mut rng);
                let pk = sk.verifying_key();
                (pk.to_bytes().as_slice().to_vec(), sk.to_bytes().as_slice().to_vec())
            }
        };
        Ok(SlhDsaKeyPair {
            public_key: SlhDsaPublicKey {
                bytes: pk_bytes,
                variant: self.variant,
            },
            private_key: SlhDsaPrivateKey {
                bytes: Zeroizing::new(sk_bytes),
                variant: self.variant,
            },
        })
    }
}

fn sign_inner(
    variant: SlhDsaVariant,
    key_bytes: &[u8],
    message: &[u8],
) -> Result<SlhDsaSignature, CryptoError> {
    let bytes = match variant {
        SlhDsaVariant::Slh128s => {
            let sk = slh_dsa::SigningKey::<Sha2_128s>::try_from(key_bytes)
                .map_err(|_| CryptoError::InvalidKey("malformed SLH-DSA-128s key".into()))?;
            let signature = sk
                .try_sign(message)
                .map_err(|e| CryptoError::SigningFailed(format!("slh-dsa-128s: {e}")))?;
            signature.to_bytes().as_slice().to_vec()
        }
        SlhDsaVariant::Slh192s => {
            let sk = slh_dsa::SigningKey::<Sha2_192s>::try_from(key_bytes)
                .map_err(|_| CryptoError::InvalidKey("malformed SLH-DSA-192s key".into()))?;
            let signature = sk
                .try_sign(message)
                .map_err(|e| CryptoError::SigningFailed(format!("slh-dsa-192s: {e}")))?;
            signature.to_bytes().as_slice().to_vec()
        }
    };
    Ok(SlhDsaSignature(bytes))
}

impl SigningKeyPair for SlhDsaKeyPair {
    type PublicKey = SlhDsaPublicKey;
    type PrivateKey = SlhDsaPrivateKey;
    type Signature = SlhDsaSignature;

    fn public_key(&self) -> Self::PublicKey {
        self.public_key.clone()
    }

    fn private_key(&self) -> Self::PrivateKey {
        SlhDsaPrivateKey {
            bytes: self.private_key.bytes.clone(),
            variant: self.private_key.variant,
        }
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        sign_inner(self.private_key.variant, &self.private_key.bytes, message)
    }
}

impl SlhDsaPublicKey {
    /// The parameter set this key belongs to.
    pub fn variant(&self) -> SlhDsaVariant {
        self.variant
    }
}

impl SlhDsaPrivateKey {
    /// The parameter set this key belongs to.
    pub fn variant(&self) -> SlhDsaVariant {
        self.variant
    }
}

impl SigningKey for SlhDsaPrivateKey {
    type Signature = SlhDsaSignature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        sign_inner(self.variant, &self.bytes, message)
    }
}

impl DerivePublic for SlhDsaPrivateKey {
    type PublicKey = SlhDsaPublicKey;

    fn derive_public(&self) -> Result<Self::PublicKey, CryptoError> {
        let bytes = match self.variant {
            SlhDsaVariant::Slh128s => {
                let sk = slh_dsa::SigningKey::<Sha2_128s>::try_from(self.bytes.as_slice())
                    .map_err(|_| CryptoError::InvalidKey("malformed SLH-DSA-128s key".into()))?;
                sk.verifying_key().to_bytes().as_slice().to_vec()
            }
            SlhDsaVariant::Slh192s => {
                let sk = slh_dsa::SigningKey::<Sha2_192s>::try_from(self.bytes.as_slice())
                    .map_err(|_| CryptoError::InvalidKey("malformed SLH-DSA-192s key".into()))?;
                sk.verifying_key().to_bytes().as_slice().to_vec()
            }
        };
        Ok(SlhDsaPublicKey {
            bytes,
            variant: self.variant,
        })
    }
}

impl VerifyingKey for SlhDsaPublicKey {
    type Signature = SlhDsaSignature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        if signature.0.len() != self.variant.signature_len() {
            return Err(CryptoError::InvalidSignature);
        }
        let ok = match self.variant {
            SlhDsaVariant::Slh128s => {
                let pk = slh_dsa::VerifyingKey::<Sha2_128s>::try_from(self.bytes.as_slice())
                    .map_err(|_| CryptoError::InvalidKey("malformed SLH-DSA-128s key".into()))?;
                let sig = slh_dsa::Signature::<Sha2_128s>::try_from(signature.0.as_slice())
                    .map_err(|_| CryptoError::InvalidSignature)?;
                pk.verify(message, &sig).is_ok()
            }
            SlhDsaVariant::Slh192s => {
                let pk = slh_dsa::VerifyingKey::<Sha2_192s>::try_from(self.bytes.as_slice())
                    .map_err(|_| CryptoError::InvalidKey("malformed SLH-DSA-192s key".into()))?;
                let sig = slh_dsa::Signature::<Sha2_192s>::try_from(signature.0.as_slice())
                    .map_err(|_| CryptoError::InvalidSignature)?;
                pk.verify(message, &sig).is_ok()
            }
        };
        if ok {
            Ok(())
        } else {
            Err(CryptoError::InvalidSignature)
        }
    }
}

impl SerializableKey for SlhDsaPublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let variant = SlhDsaVariant::from_public_key_len(bytes.len())?;
        Ok(SlhDsaPublicKey {
            bytes: bytes.to_vec(),
            variant,
        })
    }
}

impl SerializableKey for SlhDsaPrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let variant = SlhDsaVariant::from_private_key_len(bytes.len())?;
        Ok(SlhDsaPrivateKey {
            bytes: Zeroizing::new(bytes.to_vec()),
            variant,
        })
    }
}

impl SerializableKey for SlhDsaSignature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        match bytes.len() {
            7856 | 16_224 => Ok(SlhDsaSignature(bytes.to_vec())),
            n => Err(CryptoError::InvalidParameter(format!(
                "invalid SLH-DSA signature size: {n} bytes"
            ))),
        }
    }
}

impl Signature for SlhDsaSignature {}

#[cfg(test)]
mod tests;
