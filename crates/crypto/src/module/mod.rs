// Path: crates/crypto/src/module/mod.rs
//! The tag-dispatched façade consumed by the surrounding services.
//!
//! A [`CryptoModule`] owns nothing but the installed policy; every provider
//! is stateless, so the module is `Send + Sync` and all operations are safe
//! to invoke concurrently. Operations are synchronous and callers bring their
//! own scheduling, except hybrid signing, which fans its two independent
//! halves out on the rayon pool.

use crate::address::WalletAddress;
use crate::algorithms::hash;
use crate::error::CryptoError;
use crate::kem::envelope;
use crate::kem::mlkem::{MlKem768Kem, MlKem768PrivateKey, MlKem768PublicKey};
use crate::keys::{KeySet, PrivateKey, PublicKey};
use crate::security::SecretBytes;
use crate::sign;
use crate::sign::hybrid::{self, HybridVerificationMode};
use crate::wallet;
use sorcha_api::crypto::{BatchVerifier, KemKeyPair, KeyEncapsulation, SerializableKey};
use sorcha_api::services::PolicyStore;
use sorcha_types::algorithm::AlgorithmTag;
use sorcha_types::hybrid::HybridSignature;
use sorcha_types::policy::CryptoPolicy;
use zeroize::Zeroizing;

/// A [`PolicyStore`] over a fixed policy, for process wiring and tests.
pub struct StaticPolicyStore(pub CryptoPolicy);

impl PolicyStore for StaticPolicyStore {
    fn active_policy(&self) -> Result<CryptoPolicy, CryptoError> {
        Ok(self.0.clone())
    }
}

/// The façade over every provider in the crate.
pub struct CryptoModule {
    policy: CryptoPolicy,
}

impl CryptoModule {
    /// Install a policy after re-validating it.
    pub fn new(policy: CryptoPolicy) -> Result<Self, CryptoError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// A module under the permit-all default policy.
    pub fn with_default_policy() -> Self {
        match Self::new(CryptoPolicy::permit_all()) {
            Ok(module) => module,
            Err(_) => unreachable!("the built-in default policy is valid"),
        }
    }

    /// Load the active policy from a store at process start.
    pub fn from_store(store: &dyn PolicyStore) -> Result<Self, CryptoError> {
        Self::new(store.active_policy()?)
    }

    /// The installed policy.
    pub fn policy(&self) -> &CryptoPolicy {
        &self.policy
    }

    fn check_signature_policy(&self, tag: AlgorithmTag) -> Result<(), CryptoError> {
        if !self.policy.permits_signature(tag) {
            return Err(CryptoError::PolicyViolation(format!(
                "{tag} is not permitted for signing"
            )));
        }
        if self.policy.is_deprecated(tag) {
            log::warn!("{tag} is deprecated under policy version {}", self.policy.version);
        }
        Ok(())
    }

    fn check_kem_policy(&self, tag: AlgorithmTag) -> Result<(), CryptoError> {
        if !self.policy.permits_kem(tag) {
            return Err(CryptoError::PolicyViolation(format!(
                "{tag} is not permitted for key encapsulation"
            )));
        }
        Ok(())
    }

    /// Generate a key set for any signature or KEM algorithm.
    pub fn generate_key_set(&self, tag: AlgorithmTag) -> Result<KeySet, CryptoError> {
        if tag.is_signature() {
            self.check_signature_policy(tag)?;
            let (public, private) = sign::generate_keypair_bytes(tag)?;
            let public_key = PublicKey::new(tag, public)?;
            let private_key = PrivateKey::new(tag, SecretBytes::from_slice(&private))?;
            KeySet::new(tag, public_key, private_key)
        } else if tag.is_kem() {
            self.check_kem_policy(tag)?;
            let pair = MlKem768Kem::new().generate_keypair()?;
            let public_key = PublicKey::new(tag, pair.public_key().to_bytes())?;
            let private_key =
                PrivateKey::new(tag, SecretBytes::new(pair.private_key().to_bytes()))?;
            KeySet::new(tag, public_key, private_key)
        } else {
            Err(CryptoError::Unsupported(format!("{tag} has no key material")))
        }
    }

    /// Sign a (usually pre-hashed) message.
    pub fn sign(
        &self,
        message: &[u8],
        tag: AlgorithmTag,
        private_key: &PrivateKey,
    ) -> Result<Vec<u8>, CryptoError> {
        self.check_signature_policy(tag)?;
        if private_key.tag() != tag {
            return Err(CryptoError::InvalidParameter(format!(
                "key is tagged {}, not {tag}",
                private_key.tag()
            )));
        }
        sign::sign_bytes(tag, message, private_key.expose())
    }

    /// Verify a signature.
    pub fn verify(
        &self,
        signature: &[u8],
        message: &[u8],
        tag: AlgorithmTag,
        public_key: &PublicKey,
    ) -> Result<(), CryptoError> {
        self.check_signature_policy(tag)?;
        if public_key.tag() != tag {
            return Err(CryptoError::InvalidParameter(format!(
                "key is tagged {}, not {tag}",
                public_key.tag()
            )));
        }
        sign::verify_bytes(tag, message, signature, public_key.as_bytes())
    }

    /// Recompute the public half of a private key.
    pub fn derive_public(
        &self,
        tag: AlgorithmTag,
        private_key: &PrivateKey,
    ) -> Result<PublicKey, CryptoError> {
        if private_key.tag() != tag {
            return Err(CryptoError::InvalidParameter(format!(
                "key is tagged {}, not {tag}",
                private_key.tag()
            )));
        }
        if tag.is_kem() {
            let key = MlKem768PrivateKey::from_bytes(private_key.expose())?;
            return PublicKey::new(tag, key.derive_public()?.to_bytes());
        }
        PublicKey::new(tag, sign::derive_public_bytes(tag, private_key.expose())?)
    }

    /// Encrypt a payload to a KEM public key via the hybrid envelope.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        tag: AlgorithmTag,
        public_key: &PublicKey,
    ) -> Result<Vec<u8>, CryptoError> {
        self.check_kem_policy(tag)?;
        if public_key.tag() != tag {
            return Err(CryptoError::InvalidParameter(format!(
                "key is tagged {}, not {tag}",
                public_key.tag()
            )));
        }
        let recipient = MlKem768PublicKey::from_bytes(public_key.as_bytes())?;
        envelope::seal(&recipient, plaintext)
    }

    /// Decrypt a hybrid envelope.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        tag: AlgorithmTag,
        private_key: &PrivateKey,
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.check_kem_policy(tag)?;
        if private_key.tag() != tag {
            return Err(CryptoError::InvalidParameter(format!(
                "key is tagged {}, not {tag}",
                private_key.tag()
            )));
        }
        let key = MlKem768PrivateKey::from_bytes(private_key.expose())?;
        envelope::open(&key, ciphertext)
    }

    /// Compute a digest.
    pub fn hash(&self, data: &[u8], tag: AlgorithmTag) -> Result<Vec<u8>, CryptoError> {
        if !self.policy.permits_hash(tag) {
            return Err(CryptoError::PolicyViolation(format!(
                "{tag} is not permitted for hashing"
            )));
        }
        hash::compute(tag, data)
    }

    /// Produce a hybrid signature, signing both halves in parallel.
    pub fn hybrid_sign(
        &self,
        message: &[u8],
        classical_tag: AlgorithmTag,
        classical_key: &PrivateKey,
        pqc_tag: AlgorithmTag,
        pqc_key: &PrivateKey,
    ) -> Result<HybridSignature, CryptoError> {
        self.check_signature_policy(classical_tag)?;
        self.check_signature_policy(pqc_tag)?;
        if classical_key.tag() != classical_tag || pqc_key.tag() != pqc_tag {
            return Err(CryptoError::InvalidParameter(
                "key tags do not match the requested algorithms".into(),
            ));
        }
        hybrid::hybrid_sign(
            message,
            classical_tag,
            classical_key.expose(),
            pqc_tag,
            pqc_key.expose(),
        )
    }

    /// Verify a hybrid signature under the given mode.
    pub fn hybrid_verify(
        &self,
        container: &HybridSignature,
        message: &[u8],
        classical_public_key: Option<&PublicKey>,
        expected_address: Option<&WalletAddress>,
        mode: HybridVerificationMode,
    ) -> Result<(), CryptoError> {
        for tag in [container.classical_algorithm, container.pqc_algorithm]
            .into_iter()
            .flatten()
        {
            self.check_signature_policy(tag)?;
        }
        hybrid::hybrid_verify(
            container,
            message,
            classical_public_key.map(PublicKey::as_bytes),
            expected_address,
            mode,
        )
    }

    /// Derive the wallet address bound to a signing key.
    pub fn address_for(
        &self,
        public_key: &PublicKey,
        network_tag: u8,
    ) -> Result<WalletAddress, CryptoError> {
        wallet::address_for_key(public_key.tag(), network_tag, public_key.as_bytes())
    }

    /// Verify a batch of signatures in parallel. Policy-refused tags yield
    /// `false` for their element, like any other invalid input.
    pub fn verify_batch(
        &self,
        items: &[(&[u8], &[u8], &[u8], AlgorithmTag)],
    ) -> Result<Vec<bool>, CryptoError> {
        let verifier = crate::sign::batch::CpuBatchVerifier::new();
        let results = BatchVerifier::verify_batch(&verifier, items)?;
        Ok(results
            .into_iter()
            .zip(items)
            .map(|(ok, (_, _, _, tag))| ok && self.policy.permits_signature(*tag))
            .collect())
    }
}

#[cfg(test)]
mod tests;
