// Path: crates/crypto/src/error.rs
//! Local error types for the `sorcha-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use sorcha_api::error::CryptoError;
