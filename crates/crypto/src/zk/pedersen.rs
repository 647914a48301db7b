// Path: crates/crypto/src/zk/pedersen.rs
//! Pedersen commitments: `C = v·G + r·H`.
//!
//! `G` is the secp256k1 base point. `H` is a nothing-up-my-sleeve second
//! generator derived by hashing a fixed label to the curve (RFC 9380 SSWU),
//! so nobody knows its discrete log with respect to `G`. The commitment is
//! perfectly hiding and computationally binding.

use super::{decode_point, encode_point, random_nonzero_scalar, POINT_LEN};
use crate::error::CryptoError;
use k256::elliptic_curve::hash2curve::{ExpandMsgXmd, GroupDigest};
use k256::elliptic_curve::Field;
use k256::{ProjectivePoint, Scalar, Secp256k1};
use std::sync::OnceLock;

/// Label hashed to the curve to produce `H`.
pub const PEDERSEN_H_INPUT: &[u8] = b"SORCHA-PEDERSEN-H";

/// Compressed commitment length.
pub const COMMITMENT_LEN: usize = POINT_LEN;

static GENERATOR_H: OnceLock<ProjectivePoint> = OnceLock::new();

/// The fixed second generator. Computed once; the parameters are constants,
/// so failure here is an unrecoverable setup defect.
pub fn generator_h() -> ProjectivePoint {
    *GENERATOR_H.get_or_init(|| {
        match Secp256k1::hash_from_bytes::<ExpandMsgXmd<sha2::Sha256>>(
            &[PEDERSEN_H_INPUT],
            &[PEDERSEN_H_INPUT],
        ) {
            Ok(point) => point,
            Err(_) => unreachable!("hash-to-curve of a fixed label cannot fail"),
        }
    })
}

/// A commitment to a 64-bit value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PedersenCommitment {
    pub(crate) point: ProjectivePoint,
}

/// The secret opening of a commitment. The blinding scalar is wiped on drop.
pub struct PedersenOpening {
    /// The committed value.
    pub value: u64,
    pub(crate) blinding: Scalar,
}

impl Drop for PedersenOpening {
    fn drop(&mut self) {
        self.blinding = Scalar::ZERO;
    }
}

impl PedersenOpening {
    /// The blinding factor in big-endian bytes, for external wrapping.
    pub fn blinding_bytes(&self) -> [u8; 32] {
        super::encode_scalar(&self.blinding)
    }
}

impl PedersenCommitment {
    /// Commit to `value` with a fresh uniform blinding factor.
    pub fn commit(value: u64) -> Result<(Self, PedersenOpening), CryptoError> {
        let blinding = random_nonzero_scalar();
        let commitment = Self::commit_with(value, &blinding);
        Ok((commitment, PedersenOpening { value, blinding }))
    }

    /// Commit to `value` under a caller-chosen blinding factor.
    pub(crate) fn commit_with(value: u64, blinding: &Scalar) -> Self {
        let point =
            ProjectivePoint::GENERATOR * Scalar::from(value) + generator_h() * blinding;
        Self { point }
    }

    /// Check an opening against this commitment.
    pub fn verify_opening(&self, opening: &PedersenOpening) -> bool {
        Self::commit_with(opening.value, &opening.blinding).point == self.point
    }

    /// Compressed 33-byte encoding.
    pub fn to_bytes(&self) -> Result<[u8; COMMITMENT_LEN], CryptoError> {
        encode_point(&self.point)
    }

    /// Strict decoding of a compressed commitment.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            point: decode_point(bytes)?,
        })
    }
}
