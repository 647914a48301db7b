// Path: crates/crypto/src/lib.rs
//! # Sorcha Crypto Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # Sorcha Cryptography
//!
//! Cryptographic providers for the Sorcha verifiable-record platform:
//! classical and post-quantum signatures, hybrid signature containers,
//! ML-KEM-768 encryption envelopes, BLS12-381 threshold signatures,
//! secp256k1 commitment proofs, the Bech32m address codec and the
//! tag-dispatched [`module::CryptoModule`] façade.

pub mod address;
pub mod algorithms;
pub mod error;
pub mod kem;
pub mod keys;
pub mod keystore;
pub mod module;
pub mod security;
pub mod sign;
pub mod wallet;
pub mod zk;
