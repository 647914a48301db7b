// Path: crates/crypto/src/sign/batch.rs

use crate::error::CryptoError;
use crate::sign::verify_bytes;
use rayon::prelude::*;
use sorcha_api::crypto::BatchVerifier;
use sorcha_types::algorithm::AlgorithmTag;

/// A CPU-based batch verifier that uses Rayon for parallelism.
///
/// Order of the result vector corresponds to the input slice; a malformed
/// key, signature or tag simply yields `false` for that element rather than
/// failing the whole batch.
#[derive(Default, Debug)]
pub struct CpuBatchVerifier;

impl CpuBatchVerifier {
    pub fn new() -> Self {
        Self
    }

    fn verify_single(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
        tag: AlgorithmTag,
    ) -> bool {
        verify_bytes(tag, message, signature, public_key).is_ok()
    }
}

impl BatchVerifier for CpuBatchVerifier {
    fn verify_batch(
        &self,
        items: &[(&[u8], &[u8], &[u8], AlgorithmTag)],
    ) -> Result<Vec<bool>, CryptoError> {
        let results: Vec<bool> = items
            .par_iter()
            .map(|(pk, msg, sig, tag)| self.verify_single(pk, msg, sig, *tag))
            .collect();
        Ok(results)
    }
}
