// Path: crates/crypto/src/zk/inclusion.rs
//! Schnorr inclusion proofs.
//!
//! Proves knowledge of `(v, r)` opening a Pedersen commitment `C = v·G + r·H`
//! while binding the statement to a Merkle root and a docket identifier:
//!
//! - nonce commitment `T = kv·G + kr·H`
//! - challenge `e = H("SORCHA-INCL" ‖ C ‖ root ‖ docket_id ‖ T) mod q`
//! - responses `sv = kv + e·v`, `sr = kr + e·r`
//!
//! Verification recomputes `T' = sv·G + sr·H − e·C` and checks the challenge
//! equation, then walks the Merkle path from the transaction hash to the
//! root. Path nodes hash as sorted pairs, so sibling order does not matter.

use super::pedersen::{generator_h, PedersenCommitment, PedersenOpening, COMMITMENT_LEN};
use super::{challenge, decode_point, decode_scalar, encode_point, encode_scalar, random_nonzero_scalar};
use crate::algorithms::hash::sha256;
use crate::error::CryptoError;
use k256::{ProjectivePoint, Scalar};

/// Challenge label for this proof kind.
const INCLUSION_LABEL: &[u8] = b"SORCHA-INCL";

/// `e ‖ sv ‖ sr`.
pub const PROOF_DATA_LEN: usize = 96;
/// `G ‖ H`, both compressed.
pub const VERIFICATION_KEY_LEN: usize = 66;

/// A proof that a committed docket entry is included under a Merkle root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionProof {
    /// Compressed Pedersen commitment (33 bytes).
    pub commitment: Vec<u8>,
    /// `e ‖ sv ‖ sr` (96 bytes).
    pub proof_data: Vec<u8>,
    /// Root the statement is bound to.
    pub merkle_root: [u8; 32],
    /// Sibling hashes from the transaction hash up to the root.
    pub merkle_path: Vec<[u8; 32]>,
    /// The generator pair `G ‖ H` the proof was produced under (66 bytes).
    pub verification_key: Vec<u8>,
    /// The docket the statement is bound to.
    pub docket_id: String,
}

/// The generator pair encoding carried inside each proof.
fn verification_key_bytes() -> Result<Vec<u8>, CryptoError> {
    let mut out = Vec::with_capacity(VERIFICATION_KEY_LEN);
    out.extend_from_slice(&encode_point(&ProjectivePoint::GENERATOR)?);
    out.extend_from_slice(&encode_point(&generator_h())?);
    Ok(out)
}

/// Fold a leaf hash up a Merkle path with sorted-pair SHA-256.
fn merkle_fold(leaf: &[u8; 32], path: &[[u8; 32]]) -> [u8; 32] {
    let mut node = *leaf;
    for sibling in path {
        let mut preimage = [0u8; 64];
        let (left, right) = preimage.split_at_mut(32);
        if node <= *sibling {
            left.copy_from_slice(&node);
            right.copy_from_slice(sibling);
        } else {
            left.copy_from_slice(sibling);
            right.copy_from_slice(&node);
        }
        node = sha256(preimage);
    }
    node
}

/// Produce an inclusion proof for an opened commitment.
///
/// The caller supplies the Merkle context from its docket tree; the prover
/// refuses to emit a proof whose path does not actually authenticate
/// `tx_hash` under `merkle_root`, or whose opening does not match the
/// commitment.
pub fn prove_inclusion(
    opening: &PedersenOpening,
    commitment: &PedersenCommitment,
    tx_hash: &[u8; 32],
    merkle_root: &[u8; 32],
    merkle_path: &[[u8; 32]],
    docket_id: &str,
) -> Result<InclusionProof, CryptoError> {
    if docket_id.is_empty() {
        return Err(CryptoError::InvalidParameter("empty docket id".into()));
    }
    if !commitment.verify_opening(opening) {
        return Err(CryptoError::InvalidParameter(
            "opening does not match commitment".into(),
        ));
    }
    if merkle_fold(tx_hash, merkle_path) != *merkle_root {
        return Err(CryptoError::InvalidParameter(
            "merkle path does not authenticate tx hash under root".into(),
        ));
    }

    let commitment_bytes = commitment.to_bytes()?;

    let kv = random_nonzero_scalar();
    let kr = random_nonzero_scalar();
    let nonce_commitment = ProjectivePoint::GENERATOR * kv + generator_h() * kr;
    let t_bytes = encode_point(&nonce_commitment)?;

    let e = challenge(&[
        INCLUSION_LABEL,
        &commitment_bytes,
        merkle_root,
        docket_id.as_bytes(),
        &t_bytes,
    ]);
    let sv = kv + e * Scalar::from(opening.value);
    let sr = kr + e * opening.blinding;

    let mut proof_data = Vec::with_capacity(PROOF_DATA_LEN);
    proof_data.extend_from_slice(&encode_scalar(&e));
    proof_data.extend_from_slice(&encode_scalar(&sv));
    proof_data.extend_from_slice(&encode_scalar(&sr));

    Ok(InclusionProof {
        commitment: commitment_bytes.to_vec(),
        proof_data,
        merkle_root: *merkle_root,
        merkle_path: merkle_path.to_vec(),
        verification_key: verification_key_bytes()?,
        docket_id: docket_id.to_string(),
    })
}

/// Verify an inclusion proof against the transaction hash it claims to cover.
///
/// Structural defects are `InvalidParameter`; a failed sigma-protocol or
/// Merkle check is `InvalidSignature`.
pub fn verify_inclusion(proof: &InclusionProof, tx_hash: &[u8]) -> Result<(), CryptoError> {
    let tx_hash: [u8; 32] = tx_hash
        .try_into()
        .map_err(|_| CryptoError::parameter_length("tx hash", 32, tx_hash.len()))?;
    if proof.commitment.len() != COMMITMENT_LEN {
        return Err(CryptoError::parameter_length(
            "commitment",
            COMMITMENT_LEN,
            proof.commitment.len(),
        ));
    }
    if proof.proof_data.len() != PROOF_DATA_LEN {
        return Err(CryptoError::parameter_length(
            "proof data",
            PROOF_DATA_LEN,
            proof.proof_data.len(),
        ));
    }
    if proof.verification_key.len() != VERIFICATION_KEY_LEN {
        return Err(CryptoError::parameter_length(
            "verification key",
            VERIFICATION_KEY_LEN,
            proof.verification_key.len(),
        ));
    }
    if proof.docket_id.is_empty() {
        return Err(CryptoError::InvalidParameter("empty docket id".into()));
    }
    if proof.verification_key != verification_key_bytes()? {
        return Err(CryptoError::InvalidParameter(
            "proof was produced under foreign generators".into(),
        ));
    }

    let commitment = decode_point(&proof.commitment)?;
    let (e_bytes, rest) = proof.proof_data.split_at(32);
    let (sv_bytes, sr_bytes) = rest.split_at(32);
    let e = decode_scalar(e_bytes)?;
    let sv = decode_scalar(sv_bytes)?;
    let sr = decode_scalar(sr_bytes)?;

    // T' = sv·G + sr·H − e·C
    let recovered = ProjectivePoint::GENERATOR * sv + generator_h() * sr - commitment * e;
    let t_bytes = encode_point(&recovered).map_err(|_| CryptoError::InvalidSignature)?;

    let expected = challenge(&[
        INCLUSION_LABEL,
        &proof.commitment,
        &proof.merkle_root,
        proof.docket_id.as_bytes(),
        &t_bytes,
    ]);
    if expected != e {
        return Err(CryptoError::InvalidSignature);
    }

    if merkle_fold(&tx_hash, &proof.merkle_path) != proof.merkle_root {
        return Err(CryptoError::InvalidSignature);
    }
    Ok(())
}

impl InclusionProof {
    /// Wire form:
    /// `commitment(33) ‖ proof(96) ‖ root(32) ‖ siblings(32 each) ‖ vk(66) ‖ docket_id(utf-8)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            COMMITMENT_LEN
                + PROOF_DATA_LEN
                + 32
                + 32 * self.merkle_path.len()
                + VERIFICATION_KEY_LEN
                + self.docket_id.len(),
        );
        out.extend_from_slice(&self.commitment);
        out.extend_from_slice(&self.proof_data);
        out.extend_from_slice(&self.merkle_root);
        for sibling in &self.merkle_path {
            out.extend_from_slice(sibling);
        }
        out.extend_from_slice(&self.verification_key);
        out.extend_from_slice(self.docket_id.as_bytes());
        out
    }

    /// Parse the wire form. The sibling count is carried by the surrounding
    /// record, not the byte stream, so the caller supplies it.
    pub fn from_bytes(bytes: &[u8], path_len: usize) -> Result<Self, CryptoError> {
        let fixed = COMMITMENT_LEN + PROOF_DATA_LEN + 32 + 32 * path_len + VERIFICATION_KEY_LEN;
        if bytes.len() <= fixed {
            return Err(CryptoError::InvalidParameter(format!(
                "inclusion proof record too short: {} bytes",
                bytes.len()
            )));
        }
        let (commitment, rest) = bytes.split_at(COMMITMENT_LEN);
        let (proof_data, rest) = rest.split_at(PROOF_DATA_LEN);
        let (root_bytes, rest) = rest.split_at(32);
        let (path_bytes, rest) = rest.split_at(32 * path_len);
        let (verification_key, docket_bytes) = rest.split_at(VERIFICATION_KEY_LEN);

        let mut merkle_root = [0u8; 32];
        merkle_root.copy_from_slice(root_bytes);
        let merkle_path = path_bytes
            .chunks_exact(32)
            .map(|chunk| {
                let mut sibling = [0u8; 32];
                sibling.copy_from_slice(chunk);
                sibling
            })
            .collect();
        let docket_id = std::str::from_utf8(docket_bytes)
            .map_err(|_| CryptoError::InvalidEncoding("docket id is not UTF-8".into()))?
            .to_string();

        Ok(Self {
            commitment: commitment.to_vec(),
            proof_data: proof_data.to_vec(),
            merkle_root,
            merkle_path,
            verification_key: verification_key.to_vec(),
            docket_id,
        })
    }
}
