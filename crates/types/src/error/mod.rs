// Path: crates/types/src/error/mod.rs
//! Core error types for the Sorcha cryptographic core.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors from cryptographic operations.
///
/// This is the single error surface of the core. Backend library errors are
/// always mapped into one of these variants before they reach a caller, and
/// secret material never appears in the message text. `InvalidSignature` and
/// `DecryptionFailed` intentionally carry no detail: which half of a hybrid
/// signature failed, or whether an AEAD open failed because of a wrong key or
/// a tampered ciphertext, is diagnosed through logging, not return values.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// A caller-supplied input violates a precondition (length, emptiness, range).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Key material is malformed or of the wrong length for the algorithm.
    #[error("Invalid cryptographic key: {0}")]
    InvalidKey(String),
    /// The cryptographic verification check returned false.
    #[error("Signature verification failed")]
    InvalidSignature,
    /// The CSPRNG failed or an internal key-generation invariant was violated.
    #[error("Key generation failed: {0}")]
    KeyGenFailed(String),
    /// The underlying primitive refused to produce a signature.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
    /// The KEM envelope or AEAD layer failed to encrypt.
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
    /// The AEAD tag check failed: wrong key or tampered ciphertext.
    #[error("Decryption failed")]
    DecryptionFailed,
    /// The requested algorithm is forbidden by the active policy.
    #[error("Policy violation: {0}")]
    PolicyViolation(String),
    /// An address or signature container could not be parsed.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
    /// The algorithm tag is not known to this operation.
    #[error("Unsupported algorithm or operation: {0}")]
    Unsupported(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "CRYPTO_INVALID_PARAMETER",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature => "CRYPTO_INVALID_SIGNATURE",
            Self::KeyGenFailed(_) => "CRYPTO_KEYGEN_FAILED",
            Self::SigningFailed(_) => "CRYPTO_SIGNING_FAILED",
            Self::EncryptionFailed(_) => "CRYPTO_ENCRYPTION_FAILED",
            Self::DecryptionFailed => "CRYPTO_DECRYPTION_FAILED",
            Self::PolicyViolation(_) => "CRYPTO_POLICY_VIOLATION",
            Self::InvalidEncoding(_) => "CRYPTO_INVALID_ENCODING",
            Self::Unsupported(_) => "CRYPTO_UNSUPPORTED",
        }
    }
}

impl CryptoError {
    /// Build an `InvalidKey` error for a length mismatch without echoing key bytes.
    pub fn key_length(expected: usize, got: usize) -> Self {
        Self::InvalidKey(format!("expected {expected} bytes, got {got}"))
    }

    /// Build an `InvalidParameter` error for a length mismatch.
    pub fn parameter_length(what: &str, expected: usize, got: usize) -> Self {
        Self::InvalidParameter(format!("{what}: expected {expected} bytes, got {got}"))
    }
}
