// Path: crates/crypto/src/sign/bls/threshold.rs
//! Trusted-dealer t-of-n threshold signing over BLS12-381.
//!
//! The dealer samples a degree `t-1` polynomial `f` over Fr, hands share `i`
//! the evaluation `f(i)`, and publishes `group_pk = [f(0)]·G2`. Lagrange
//! interpolation at zero recombines any `t` correct partial signatures into
//! the signature the constant term would have produced directly, so the
//! aggregate is identical for every t-subset and verifies against the group
//! key alone.

use super::{hash_to_g1, BlsPrivateKey, BlsPublicKey, BlsSignature};
use crate::error::CryptoError;
use bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use ff::Field;
use group::Group;
use rand::rngs::OsRng;
use sorcha_api::crypto::SerializableKey;

/// One validator's share of the group secret.
pub struct BlsKeyShare {
    /// Evaluation point, in `1..=n`. Zero is the group secret and never a share.
    pub index: u32,
    /// The validator the dealer assigned this share to.
    pub validator_id: String,
    /// `f(index)` in Fr.
    secret_share: BlsPrivateKey,
    /// `[f(index)]·G2`, published for partial-signature audit.
    pub public_share: BlsPublicKey,
}

impl BlsKeyShare {
    /// The secret scalar, for wrapping into external storage.
    pub fn secret_share(&self) -> &BlsPrivateKey {
        &self.secret_share
    }

    /// Signs `message` with this share. The result is a compressed G1 element
    /// that verifies against [`BlsKeyShare::public_share`].
    pub fn sign_partial(&self, message: &[u8]) -> Result<BlsSignature, CryptoError> {
        if message.is_empty() {
            return Err(CryptoError::InvalidParameter("empty message".into()));
        }
        Ok(BlsSignature(G1Affine::from(
            hash_to_g1(message) * self.secret_share.0,
        )))
    }
}

impl BlsKeyShare {
    /// Wire form for handing a share to its validator:
    /// `index(u32 BE) ‖ sk_share(32) ‖ pk_share(96) ‖ validator_id(utf-8)`.
    ///
    /// The output contains the share secret; callers wrap it with the key
    /// store before it leaves the ceremony.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + 32 + 96 + self.validator_id.len());
        out.extend_from_slice(&self.index.to_be_bytes());
        out.extend_from_slice(&self.secret_share.to_bytes());
        out.extend_from_slice(&self.public_share.to_bytes());
        out.extend_from_slice(self.validator_id.as_bytes());
        out
    }

    /// Parse the wire form, re-checking that the public share matches the
    /// secret share.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        const FIXED: usize = 4 + 32 + 96;
        if bytes.len() <= FIXED {
            return Err(CryptoError::InvalidParameter(format!(
                "share record too short: {} bytes",
                bytes.len()
            )));
        }
        let (index_bytes, rest) = bytes.split_at(4);
        let (secret_bytes, rest) = rest.split_at(32);
        let (public_bytes, id_bytes) = rest.split_at(96);

        let index = u32::from_be_bytes(
            index_bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidParameter("malformed share index".into()))?,
        );
        if index < 1 {
            return Err(CryptoError::InvalidParameter("share index zero".into()));
        }
        let secret_share = BlsPrivateKey::from_bytes(secret_bytes)?;
        let public_share = BlsPublicKey::from_bytes(public_bytes)?;
        if sorcha_api::crypto::DerivePublic::derive_public(&secret_share)? != public_share {
            return Err(CryptoError::InvalidKey(
                "public share does not match secret share".into(),
            ));
        }
        let validator_id = std::str::from_utf8(id_bytes)
            .map_err(|_| CryptoError::InvalidEncoding("validator id is not UTF-8".into()))?
            .to_string();

        Ok(Self {
            index,
            validator_id,
            secret_share,
            public_share,
        })
    }
}

/// The output of a dealer ceremony.
pub struct BlsThresholdKeySet {
    /// Minimum number of shares that must co-sign.
    pub threshold: u32,
    /// Total number of shares dealt.
    pub total: u32,
    /// `[f(0)]·G2`.
    pub group_public_key: BlsPublicKey,
    /// All `n` shares, index `i` at position `i-1`.
    pub shares: Vec<BlsKeyShare>,
}

/// A recombined signature plus the audit record of who contributed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlsAggregateSignature {
    /// The group signature in G1.
    pub signature: BlsSignature,
    /// `ceil(n/8)` bytes; bit `i-1` is set iff share `i` contributed.
    pub bitfield: Vec<u8>,
    /// The threshold the aggregator was asked to meet.
    pub threshold: u32,
    /// The committee size the bitfield is sized for.
    pub total: u32,
}

/// Deal a fresh t-of-n key set.
///
/// `validator_ids` must have exactly `total` entries; share `i` is assigned
/// `validator_ids[i-1]`. All polynomial coefficients are wiped before the
/// function returns.
pub fn generate_threshold_key_shares(
    threshold: u32,
    total: u32,
    validator_ids: &[String],
) -> Result<BlsThresholdKeySet, CryptoError> {
    if threshold < 1 || threshold > total {
        return Err(CryptoError::InvalidParameter(format!(
            "threshold {threshold} out of range for committee of {total}"
        )));
    }
    if validator_ids.len() != total as usize {
        return Err(CryptoError::InvalidParameter(format!(
            "expected {total} validator ids, got {}",
            validator_ids.len()
        )));
    }

    // f(x) = a_0 + a_1 x + ... + a_{t-1} x^{t-1}, coefficients uniform in Fr.
    let mut coefficients: Vec<Scalar> = (0..threshold)
        .map(|_| Scalar::random(&mut OsRng))
        .collect();

    let constant_term = coefficients
        .first()
        .copied()
        .ok_or_else(|| CryptoError::KeyGenFailed("empty share polynomial".into()))?;
    let group_public_key = BlsPublicKey(G2Affine::from(G2Projective::generator() * constant_term));

    let mut shares = Vec::with_capacity(total as usize);
    for (offset, validator_id) in validator_ids.iter().enumerate() {
        let index = offset as u32 + 1;
        let secret = evaluate_polynomial(&coefficients, index);
        let public_share = BlsPublicKey(G2Affine::from(G2Projective::generator() * secret));
        shares.push(BlsKeyShare {
            index,
            validator_id: validator_id.clone(),
            secret_share: BlsPrivateKey(secret),
            public_share,
        });
    }

    // The ceremony secrets must not outlive the dealing.
    for coefficient in coefficients.iter_mut() {
        *coefficient = Scalar::ZERO;
    }

    Ok(BlsThresholdKeySet {
        threshold,
        total,
        group_public_key,
        shares,
    })
}

// Horner evaluation of f at x = index in Fr.
fn evaluate_polynomial(coefficients: &[Scalar], index: u32) -> Scalar {
    let x = Scalar::from(u64::from(index));
    coefficients
        .iter()
        .rev()
        .fold(Scalar::ZERO, |acc, coefficient| acc * x + coefficient)
}

/// Lagrange coefficient at zero for `index` within the evaluation set `indices`.
fn lagrange_coefficient(index: u32, indices: &[u32]) -> Result<Scalar, CryptoError> {
    let x_i = Scalar::from(u64::from(index));
    let mut numerator = Scalar::ONE;
    let mut denominator = Scalar::ONE;
    for &j in indices {
        if j == index {
            continue;
        }
        let x_j = Scalar::from(u64::from(j));
        numerator *= x_j;
        denominator *= x_j - x_i;
    }
    let inverse = Option::<Scalar>::from(denominator.invert()).ok_or_else(|| {
        CryptoError::InvalidParameter("duplicate share indices in aggregation".into())
    })?;
    Ok(numerator * inverse)
}

/// Recombine partial signatures into the group signature.
///
/// `partial_signatures[k]` must be the partial produced by share
/// `indices[k]`. At least `threshold` pairs are required; when more are
/// supplied, the first `threshold` are used, which keeps the operation
/// deterministic while the Lagrange recombination makes the output identical
/// for *any* t-subset of correct partials. The declared `threshold` is taken
/// at face value: quorum policy beyond `len >= threshold` is the caller's
/// responsibility, and an undersized ceremony produces an aggregate that
/// simply fails pairing verification.
pub fn aggregate(
    partial_signatures: &[BlsSignature],
    indices: &[u32],
    threshold: u32,
    total: u32,
) -> Result<BlsAggregateSignature, CryptoError> {
    if threshold < 1 || threshold > total {
        return Err(CryptoError::InvalidParameter(format!(
            "threshold {threshold} out of range for committee of {total}"
        )));
    }
    if partial_signatures.len() != indices.len() {
        return Err(CryptoError::InvalidParameter(format!(
            "{} partial signatures but {} indices",
            partial_signatures.len(),
            indices.len()
        )));
    }
    if partial_signatures.len() < threshold as usize {
        return Err(CryptoError::InvalidParameter(format!(
            "{} partial signatures below threshold {threshold}",
            partial_signatures.len()
        )));
    }
    for &index in indices {
        if index < 1 || index > total {
            return Err(CryptoError::InvalidParameter(format!(
                "share index {index} out of range for committee of {total}"
            )));
        }
    }

    let chosen = threshold as usize;
    let chosen_indices = indices.get(..chosen).unwrap_or(indices);
    let chosen_partials = partial_signatures
        .get(..chosen)
        .unwrap_or(partial_signatures);

    let mut combined = G1Projective::identity();
    for (signature, &index) in chosen_partials.iter().zip(chosen_indices) {
        let lambda = lagrange_coefficient(index, chosen_indices)?;
        combined += G1Projective::from(signature.0) * lambda;
    }

    let mut bitfield = vec![0u8; total.div_ceil(8) as usize];
    for &index in chosen_indices {
        let position = (index - 1) as usize;
        if let Some(byte) = bitfield.get_mut(position / 8) {
            *byte |= 1 << (position % 8);
        }
    }

    Ok(BlsAggregateSignature {
        signature: BlsSignature(G1Affine::from(combined)),
        bitfield,
        threshold,
        total,
    })
}

/// Verify an aggregate against the group public key.
///
/// Structural defects (bitfield size, signer count below the declared
/// threshold) are `InvalidParameter`; a failed pairing check is
/// `InvalidSignature`.
pub fn verify_aggregate(
    aggregate: &BlsAggregateSignature,
    group_public_key: &BlsPublicKey,
    message: &[u8],
) -> Result<(), CryptoError> {
    if message.is_empty() {
        return Err(CryptoError::InvalidParameter("empty message".into()));
    }
    let expected_len = aggregate.total.div_ceil(8) as usize;
    if aggregate.bitfield.len() != expected_len {
        return Err(CryptoError::parameter_length(
            "signer bitfield",
            expected_len,
            aggregate.bitfield.len(),
        ));
    }
    let signers: u32 = aggregate.bitfield.iter().map(|byte| byte.count_ones()).sum();
    if signers < aggregate.threshold {
        return Err(CryptoError::InvalidParameter(format!(
            "bitfield records {signers} signers below threshold {}",
            aggregate.threshold
        )));
    }

    let msg_point = G1Affine::from(hash_to_g1(message));
    let lhs = bls12_381::pairing(&aggregate.signature.0, &G2Affine::generator());
    let rhs = bls12_381::pairing(&msg_point, &group_public_key.0);
    if lhs == rhs {
        Ok(())
    } else {
        Err(CryptoError::InvalidSignature)
    }
}

impl BlsAggregateSignature {
    /// Wire form: `signature(48) ‖ bitfield(ceil(n/8)) ‖ t(u32 BE) ‖ n(u32 BE)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.signature.to_bytes();
        out.extend_from_slice(&self.bitfield);
        out.extend_from_slice(&self.threshold.to_be_bytes());
        out.extend_from_slice(&self.total.to_be_bytes());
        out
    }

    /// Parse the wire form back into components.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        const FIXED: usize = super::BLS_SIGNATURE_LEN + 8;
        if bytes.len() < FIXED + 1 {
            return Err(CryptoError::InvalidParameter(format!(
                "aggregate record too short: {} bytes",
                bytes.len()
            )));
        }
        let (sig_bytes, rest) = bytes.split_at(super::BLS_SIGNATURE_LEN);
        let (bitfield, trailer) = rest.split_at(rest.len() - 8);
        let (t_bytes, n_bytes) = trailer.split_at(4);
        let threshold = u32::from_be_bytes(
            t_bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidParameter("malformed threshold field".into()))?,
        );
        let total = u32::from_be_bytes(
            n_bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidParameter("malformed total field".into()))?,
        );
        if bitfield.len() != total.div_ceil(8) as usize {
            return Err(CryptoError::parameter_length(
                "signer bitfield",
                total.div_ceil(8) as usize,
                bitfield.len(),
            ));
        }
        Ok(Self {
            signature: BlsSignature::from_bytes(sig_bytes)?,
            bitfield: bitfield.to_vec(),
            threshold,
            total,
        })
    }
}
