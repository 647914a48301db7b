// Path: crates/api/src/error/mod.rs
//! Canonical error types, re-exported from `sorcha-types`.

pub use sorcha_types::error::{CryptoError, ErrorCode};
pub use sorcha_types::Result;
