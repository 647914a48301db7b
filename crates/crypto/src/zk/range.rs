// Path: crates/crypto/src/zk/range.rs
//! Bit-decomposition range proofs.
//!
//! Proves that a committed value lies in `[0, 2^L - 1]` for `L` up to 64:
//!
//! - the value is decomposed into bits, each committed as `C_i = b_i·G + r_i·H`
//!   with the bit blindings chosen so `r = Σ 2^i·r_i` is the blinding of the
//!   top-level commitment, making `Σ 2^i·C_i = C` hold homomorphically;
//! - each bit carries a 128-byte Chaum-Pedersen OR-proof (`e0‖s0‖e1‖s1`) that
//!   `C_i` opens to zero or `C_i - G` opens to zero, with the real branch's
//!   challenge forced by `e0 + e1 = H(...)`;
//! - a 64-byte aggregation Schnorr over `H` proves the residual
//!   `Σ 2^i·C_i - C` has no `G` component, binding the bits to the value.

use super::pedersen::{generator_h, PedersenCommitment, PedersenOpening, COMMITMENT_LEN};
use super::{
    challenge, decode_point, decode_scalar, encode_point, encode_scalar, random_nonzero_scalar,
    POINT_LEN,
};
use crate::error::CryptoError;
use k256::elliptic_curve::Field;
use k256::{ProjectivePoint, Scalar};

/// Challenge label for the per-bit OR proofs.
const RANGE_BIT_LABEL: &[u8] = b"SORCHA-RANGE-BIT";
/// Challenge label for the aggregation proof.
const RANGE_AGG_LABEL: &[u8] = b"SORCHA-RANGE-AGG";

/// Per-bit commitment length.
pub const BIT_COMMITMENT_LEN: usize = POINT_LEN;
/// Per-bit OR-proof length: `e0 ‖ s0 ‖ e1 ‖ s1`.
pub const BIT_PROOF_LEN: usize = 128;
/// Aggregation proof length: `e ‖ s`.
pub const AGGREGATION_PROOF_LEN: usize = 64;
/// Largest provable bit width.
pub const MAX_BIT_LENGTH: u32 = 64;

/// A proof that a committed value fits in `bit_length` bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeProof {
    /// Compressed top-level commitment (33 bytes).
    pub commitment: Vec<u8>,
    /// One compressed commitment per bit, least significant first.
    pub bit_commitments: Vec<Vec<u8>>,
    /// One 128-byte OR-proof per bit.
    pub bit_proofs: Vec<Vec<u8>>,
    /// The 64-byte aggregation proof.
    pub aggregation_proof: Vec<u8>,
    /// `L`, in `1..=64`.
    pub bit_length: u32,
}

/// Prove `value ∈ [0, 2^bit_length - 1]`, producing the commitment alongside
/// its opening so the caller can later open or re-prove.
pub fn prove_range(
    value: u64,
    bit_length: u32,
) -> Result<(RangeProof, PedersenOpening), CryptoError> {
    if bit_length < 1 || bit_length > MAX_BIT_LENGTH {
        return Err(CryptoError::InvalidParameter(format!(
            "bit length {bit_length} outside 1..=64"
        )));
    }
    if bit_length < 64 && value >> bit_length != 0 {
        return Err(CryptoError::InvalidParameter(format!(
            "value does not fit in {bit_length} bits"
        )));
    }

    let bits = bit_length as usize;
    let mut bit_blindings = Vec::with_capacity(bits);
    let mut bit_points = Vec::with_capacity(bits);
    let mut blinding = Scalar::ZERO;
    for i in 0..bits {
        let bit = (value >> i) & 1;
        let r_i = random_nonzero_scalar();
        blinding += Scalar::from(1u64 << i) * r_i;
        bit_points.push(ProjectivePoint::GENERATOR * Scalar::from(bit) + generator_h() * r_i);
        bit_blindings.push((bit, r_i));
    }

    let commitment = PedersenCommitment::commit_with(value, &blinding);
    let commitment_bytes = commitment.to_bytes()?;

    let mut bit_commitments = Vec::with_capacity(bits);
    for point in &bit_points {
        bit_commitments.push(encode_point(point)?.to_vec());
    }

    let mut bit_proofs = Vec::with_capacity(bits);
    for ((bit, r_i), (c_i, encoded_c_i)) in bit_blindings
        .iter()
        .zip(bit_points.iter().zip(&bit_commitments))
    {
        bit_proofs.push(prove_bit(*bit, r_i, c_i, encoded_c_i)?);
    }

    // Aggregation: Σ 2^i·C_i − C opens to zero over H by construction; the
    // Schnorr proves it has no G component.
    let residual_blinding = Scalar::ZERO;
    let w = random_nonzero_scalar();
    let t_bytes = encode_point(&(generator_h() * w))?;
    let e = aggregation_challenge(&commitment_bytes, &bit_commitments, &t_bytes);
    let s = w + e * residual_blinding;

    let mut aggregation_proof = Vec::with_capacity(AGGREGATION_PROOF_LEN);
    aggregation_proof.extend_from_slice(&encode_scalar(&e));
    aggregation_proof.extend_from_slice(&encode_scalar(&s));

    let proof = RangeProof {
        commitment: commitment_bytes.to_vec(),
        bit_commitments,
        bit_proofs,
        aggregation_proof,
        bit_length,
    };
    Ok((proof, PedersenOpening { value, blinding }))
}

/// OR-proof that `c_i` commits to zero or one.
fn prove_bit(
    bit: u64,
    r_i: &Scalar,
    c_i: &ProjectivePoint,
    encoded_c_i: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let h = generator_h();
    // Branch statements: P0 = C_i = r·H, P1 = C_i − G = r·H.
    let p0 = *c_i;
    let p1 = *c_i - ProjectivePoint::GENERATOR;

    let w = random_nonzero_scalar();
    let e_sim = random_nonzero_scalar();
    let s_sim = random_nonzero_scalar();

    let (t0, t1) = if bit == 0 {
        // Real branch 0, simulated branch 1.
        (h * w, h * s_sim - p1 * e_sim)
    } else {
        // Real branch 1, simulated branch 0.
        (h * s_sim - p0 * e_sim, h * w)
    };

    let t0_bytes = encode_point(&t0)?;
    let t1_bytes = encode_point(&t1)?;
    let e = challenge(&[RANGE_BIT_LABEL, encoded_c_i, &t0_bytes, &t1_bytes]);
    let e_real = e - e_sim;
    let s_real = w + e_real * r_i;

    let (e0, s0, e1, s1) = if bit == 0 {
        (e_real, s_real, e_sim, s_sim)
    } else {
        (e_sim, s_sim, e_real, s_real)
    };

    let mut proof = Vec::with_capacity(BIT_PROOF_LEN);
    proof.extend_from_slice(&encode_scalar(&e0));
    proof.extend_from_slice(&encode_scalar(&s0));
    proof.extend_from_slice(&encode_scalar(&e1));
    proof.extend_from_slice(&encode_scalar(&s1));
    Ok(proof)
}

fn aggregation_challenge(
    commitment: &[u8],
    bit_commitments: &[Vec<u8>],
    t_bytes: &[u8],
) -> Scalar {
    let mut parts: Vec<&[u8]> = Vec::with_capacity(3 + bit_commitments.len());
    parts.push(RANGE_AGG_LABEL);
    parts.push(commitment);
    for encoded in bit_commitments {
        parts.push(encoded);
    }
    parts.push(t_bytes);
    challenge(&parts)
}

/// Verify a range proof.
///
/// Structural defects are `InvalidParameter`; any failed sigma-protocol
/// equation is `InvalidSignature`. Tampering with the commitment, any bit
/// commitment, any bit proof or the aggregation proof lands in one of the
/// two.
pub fn verify_range(proof: &RangeProof) -> Result<(), CryptoError> {
    if proof.bit_length < 1 || proof.bit_length > MAX_BIT_LENGTH {
        return Err(CryptoError::InvalidParameter(format!(
            "bit length {} outside 1..=64",
            proof.bit_length
        )));
    }
    let bits = proof.bit_length as usize;
    if proof.bit_commitments.len() != bits || proof.bit_proofs.len() != bits {
        return Err(CryptoError::InvalidParameter(format!(
            "bit arrays do not match declared length {bits}"
        )));
    }
    if proof.commitment.len() != COMMITMENT_LEN {
        return Err(CryptoError::parameter_length(
            "commitment",
            COMMITMENT_LEN,
            proof.commitment.len(),
        ));
    }
    if proof.aggregation_proof.len() != AGGREGATION_PROOF_LEN {
        return Err(CryptoError::parameter_length(
            "aggregation proof",
            AGGREGATION_PROOF_LEN,
            proof.aggregation_proof.len(),
        ));
    }

    let h = generator_h();
    let commitment = decode_point(&proof.commitment)?;

    let mut weighted_sum = ProjectivePoint::IDENTITY;
    for (i, (encoded_c_i, bit_proof)) in proof
        .bit_commitments
        .iter()
        .zip(&proof.bit_proofs)
        .enumerate()
    {
        if encoded_c_i.len() != BIT_COMMITMENT_LEN {
            return Err(CryptoError::parameter_length(
                "bit commitment",
                BIT_COMMITMENT_LEN,
                encoded_c_i.len(),
            ));
        }
        if bit_proof.len() != BIT_PROOF_LEN {
            return Err(CryptoError::parameter_length(
                "bit proof",
                BIT_PROOF_LEN,
                bit_proof.len(),
            ));
        }
        let c_i = decode_point(encoded_c_i)?;
        weighted_sum += c_i * Scalar::from(1u64 << i);

        let (e0_bytes, rest) = bit_proof.split_at(32);
        let (s0_bytes, rest) = rest.split_at(32);
        let (e1_bytes, s1_bytes) = rest.split_at(32);
        let e0 = decode_scalar(e0_bytes)?;
        let s0 = decode_scalar(s0_bytes)?;
        let e1 = decode_scalar(e1_bytes)?;
        let s1 = decode_scalar(s1_bytes)?;

        let p0 = c_i;
        let p1 = c_i - ProjectivePoint::GENERATOR;
        let t0 = h * s0 - p0 * e0;
        let t1 = h * s1 - p1 * e1;
        let t0_bytes = encode_point(&t0).map_err(|_| CryptoError::InvalidSignature)?;
        let t1_bytes = encode_point(&t1).map_err(|_| CryptoError::InvalidSignature)?;

        let e = challenge(&[RANGE_BIT_LABEL, encoded_c_i, &t0_bytes, &t1_bytes]);
        if e0 + e1 != e {
            return Err(CryptoError::InvalidSignature);
        }
    }

    // Aggregation: the residual must have no G component.
    let residual = weighted_sum - commitment;
    let (e_bytes, s_bytes) = proof.aggregation_proof.split_at(32);
    let e = decode_scalar(e_bytes)?;
    let s = decode_scalar(s_bytes)?;
    let t = h * s - residual * e;
    let t_bytes = encode_point(&t).map_err(|_| CryptoError::InvalidSignature)?;
    let expected = aggregation_challenge(&proof.commitment, &proof.bit_commitments, &t_bytes);
    if expected != e {
        return Err(CryptoError::InvalidSignature);
    }
    Ok(())
}

impl RangeProof {
    /// Wire form:
    /// `commitment(33) ‖ bit_commitments(33·L) ‖ bit_proofs(128·L) ‖ aggregation(64) ‖ L(u32 BE)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let bits = self.bit_length as usize;
        let mut out = Vec::with_capacity(
            COMMITMENT_LEN + bits * (BIT_COMMITMENT_LEN + BIT_PROOF_LEN) + AGGREGATION_PROOF_LEN + 4,
        );
        out.extend_from_slice(&self.commitment);
        for encoded in &self.bit_commitments {
            out.extend_from_slice(encoded);
        }
        for bit_proof in &self.bit_proofs {
            out.extend_from_slice(bit_proof);
        }
        out.extend_from_slice(&self.aggregation_proof);
        out.extend_from_slice(&self.bit_length.to_be_bytes());
        out
    }

    /// Parse the wire form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < 4 {
            return Err(CryptoError::InvalidParameter("range proof record too short".into()));
        }
        let (body, length_bytes) = bytes.split_at(bytes.len() - 4);
        let bit_length = u32::from_be_bytes(
            length_bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidParameter("malformed length field".into()))?,
        );
        if bit_length < 1 || bit_length > MAX_BIT_LENGTH {
            return Err(CryptoError::InvalidParameter(format!(
                "bit length {bit_length} outside 1..=64"
            )));
        }
        let bits = bit_length as usize;
        let expected =
            COMMITMENT_LEN + bits * (BIT_COMMITMENT_LEN + BIT_PROOF_LEN) + AGGREGATION_PROOF_LEN;
        if body.len() != expected {
            return Err(CryptoError::parameter_length("range proof body", expected, body.len()));
        }

        let (commitment, rest) = body.split_at(COMMITMENT_LEN);
        let (commitments_bytes, rest) = rest.split_at(bits * BIT_COMMITMENT_LEN);
        let (proofs_bytes, aggregation_proof) = rest.split_at(bits * BIT_PROOF_LEN);

        Ok(Self {
            commitment: commitment.to_vec(),
            bit_commitments: commitments_bytes
                .chunks_exact(BIT_COMMITMENT_LEN)
                .map(<[u8]>::to_vec)
                .collect(),
            bit_proofs: proofs_bytes
                .chunks_exact(BIT_PROOF_LEN)
                .map(<[u8]>::to_vec)
                .collect(),
            aggregation_proof: aggregation_proof.to_vec(),
            bit_length,
        })
    }
}
