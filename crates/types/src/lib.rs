// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Sorcha Core Types
//!
//! This crate is the foundational library for the Sorcha cryptographic core,
//! containing the algorithm registry, the policy model, the hybrid signature
//! container and the canonical error taxonomy.
//!
//! ## Architectural Role
//!
//! As the base crate, `sorcha-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This structure prevents
//! circular dependencies and provides a stable, canonical definition for
//! shared types like [`algorithm::AlgorithmTag`] and [`policy::CryptoPolicy`].

/// A top-level, crate-wide `Result` type alias with the canonical error type.
pub type Result<T, E = crate::error::CryptoError> = std::result::Result<T, E>;

/// The registry of algorithms the core understands.
pub mod algorithm;
/// The canonical error taxonomy with stable machine-readable codes.
pub mod error;
/// The hybrid (classical + post-quantum) signature container.
pub mod hybrid;
/// The algorithm acceptance policy model.
pub mod policy;
