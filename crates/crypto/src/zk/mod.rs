// Path: crates/crypto/src/zk/mod.rs
//! Zero-knowledge proofs over secp256k1.
//!
//! Plain sigma protocols, made non-interactive with Fiat-Shamir over SHA-256:
//! Pedersen commitments ([`pedersen`]), Schnorr inclusion proofs bound to a
//! Merkle root ([`inclusion`]), and bit-decomposition range proofs built from
//! OR-proofs ([`range`]). Each proof kind hashes under its own fixed label.

use crate::error::CryptoError;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

pub mod inclusion;
pub mod pedersen;
pub mod range;

/// Compressed SEC1 point length.
pub const POINT_LEN: usize = 33;
/// Field scalar length.
pub const SCALAR_LEN: usize = 32;

/// Compressed encoding of a non-identity point.
pub(crate) fn encode_point(point: &ProjectivePoint) -> Result<[u8; POINT_LEN], CryptoError> {
    let encoded = point.to_affine().to_encoded_point(true);
    encoded
        .as_bytes()
        .try_into()
        .map_err(|_| CryptoError::InvalidParameter("identity point has no 33-byte encoding".into()))
}

/// Strict decoding of a compressed SEC1 point.
pub(crate) fn decode_point(bytes: &[u8]) -> Result<ProjectivePoint, CryptoError> {
    if bytes.len() != POINT_LEN {
        return Err(CryptoError::parameter_length("curve point", POINT_LEN, bytes.len()));
    }
    let encoded = EncodedPoint::from_bytes(bytes)
        .map_err(|_| CryptoError::InvalidParameter("malformed SEC1 point".into()))?;
    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .map(ProjectivePoint::from)
        .ok_or_else(|| CryptoError::InvalidParameter("not a point on secp256k1".into()))
}

/// Big-endian scalar encoding.
pub(crate) fn encode_scalar(scalar: &Scalar) -> [u8; SCALAR_LEN] {
    scalar.to_bytes().into()
}

/// Strict canonical scalar decoding; values `>= q` are rejected.
pub(crate) fn decode_scalar(bytes: &[u8]) -> Result<Scalar, CryptoError> {
    let arr: [u8; SCALAR_LEN] = bytes
        .try_into()
        .map_err(|_| CryptoError::parameter_length("scalar", SCALAR_LEN, bytes.len()))?;
    Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(arr)))
        .ok_or_else(|| CryptoError::InvalidParameter("scalar out of range".into()))
}

/// Fiat-Shamir challenge: SHA-256 over the labelled transcript, reduced mod q.
pub(crate) fn challenge(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    <Scalar as Reduce<U256>>::reduce_bytes(&hasher.finalize())
}

/// A uniform scalar in `[1, q-1]`.
pub(crate) fn random_nonzero_scalar() -> Scalar {
    loop {
        let scalar = Scalar::random(&mut OsRng);
        if !bool::from(scalar.is_zero()) {
            return scalar;
        }
    }
}
