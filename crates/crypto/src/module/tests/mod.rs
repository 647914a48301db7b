// Path: crates/crypto/src/module/tests/mod.rs
use super::*;
use sorcha_types::policy::PolicyMode;

#[test]
fn ml_dsa_sign_verify_through_the_facade() {
    let module = CryptoModule::with_default_policy();
    let key_set = module.generate_key_set(AlgorithmTag::MlDsa65).unwrap();

    let message = "test data for ML-DSA-65 signing".as_bytes();
    let signature = module
        .sign(message, AlgorithmTag::MlDsa65, key_set.private_key())
        .unwrap();
    assert_eq!(signature.len(), 3309);
    module
        .verify(&signature, message, AlgorithmTag::MlDsa65, key_set.public_key())
        .unwrap();
}

#[test]
fn every_signature_algorithm_round_trips() {
    let module = CryptoModule::with_default_policy();
    // RSA-4096 is covered by its own provider test; keygen is too slow to
    // repeat here.
    let tags = [
        AlgorithmTag::Ed25519,
        AlgorithmTag::NistP256,
        AlgorithmTag::MlDsa65,
        AlgorithmTag::SlhDsa128s,
        AlgorithmTag::SlhDsa192s,
        AlgorithmTag::Bls12381,
    ];
    let message = b"facade round trip";
    for tag in tags {
        let key_set = module.generate_key_set(tag).unwrap();
        let signature = module.sign(message, tag, key_set.private_key()).unwrap();
        assert_eq!(Some(signature.len()), tag.signature_len(), "{tag}");
        module
            .verify(&signature, message, tag, key_set.public_key())
            .unwrap();

        // Tampered message rejects.
        assert!(module
            .verify(&signature, b"facade round trip!", tag, key_set.public_key())
            .is_err());

        // Derived public half matches the generated one.
        let derived = module.derive_public(tag, key_set.private_key()).unwrap();
        assert_eq!(derived.as_bytes(), key_set.public_key().as_bytes());
    }
}

#[test]
fn kem_envelope_through_the_facade() {
    let module = CryptoModule::with_default_policy();
    let key_set = module.generate_key_set(AlgorithmTag::MlKem768).unwrap();

    let plaintext = b"bulk payload for the tenant";
    let envelope = module
        .encrypt(plaintext, AlgorithmTag::MlKem768, key_set.public_key())
        .unwrap();
    let opened = module
        .decrypt(&envelope, AlgorithmTag::MlKem768, key_set.private_key())
        .unwrap();
    assert_eq!(&*opened, plaintext);

    // Wrong recipient fails at the AEAD layer.
    let other = module.generate_key_set(AlgorithmTag::MlKem768).unwrap();
    assert!(matches!(
        module.decrypt(&envelope, AlgorithmTag::MlKem768, other.private_key()),
        Err(CryptoError::DecryptionFailed)
    ));

    // KEM public derivation.
    let derived = module
        .derive_public(AlgorithmTag::MlKem768, key_set.private_key())
        .unwrap();
    assert_eq!(derived.as_bytes(), key_set.public_key().as_bytes());
}

#[test]
fn hybrid_sign_and_verify_through_the_facade() {
    let module = CryptoModule::with_default_policy();
    let classical = module.generate_key_set(AlgorithmTag::Ed25519).unwrap();
    let pqc = module.generate_key_set(AlgorithmTag::MlDsa65).unwrap();
    let message = b"hybrid facade flow";

    let container = module
        .hybrid_sign(
            message,
            AlgorithmTag::Ed25519,
            classical.private_key(),
            AlgorithmTag::MlDsa65,
            pqc.private_key(),
        )
        .unwrap();
    assert!(container.is_valid());

    let address = module.address_for(pqc.public_key(), 0x10).unwrap();
    module
        .hybrid_verify(
            &container,
            message,
            Some(classical.public_key()),
            Some(&address),
            HybridVerificationMode::Strict,
        )
        .unwrap();

    // The JSON form survives the trip.
    let parsed = HybridSignature::from_json(&container.to_json().unwrap()).unwrap();
    module
        .hybrid_verify(
            &parsed,
            message,
            Some(classical.public_key()),
            Some(&address),
            HybridVerificationMode::Strict,
        )
        .unwrap();
}

#[test]
fn ws2_address_binding_through_the_facade() {
    let module = CryptoModule::with_default_policy();
    let pqc = module.generate_key_set(AlgorithmTag::MlDsa65).unwrap();
    let address = module.address_for(pqc.public_key(), 0x10).unwrap();

    let mut preimage = vec![0x10];
    preimage.extend_from_slice(pqc.public_key().as_bytes());
    assert_eq!(
        address.hash,
        crate::algorithms::hash::sha256(&preimage)
    );
    assert!(address.encode().unwrap().len() < 100);
}

#[test]
fn strict_policy_refuses_deprecated_algorithms() {
    let mut policy = CryptoPolicy::permit_all();
    policy.mode = PolicyMode::Strict;
    let module = CryptoModule::new(policy).unwrap();
    assert!(matches!(
        module.generate_key_set(AlgorithmTag::Rsa4096),
        Err(CryptoError::PolicyViolation(_))
    ));
    // Non-deprecated algorithms still work.
    assert!(module.generate_key_set(AlgorithmTag::Ed25519).is_ok());
}

#[test]
fn policy_gates_every_entry_point() {
    let mut policy = CryptoPolicy::permit_all();
    policy.accepted_signature.remove(&AlgorithmTag::NistP256);
    policy.required_signature.remove(&AlgorithmTag::NistP256);
    let module = CryptoModule::new(policy).unwrap();

    assert!(matches!(
        module.generate_key_set(AlgorithmTag::NistP256),
        Err(CryptoError::PolicyViolation(_))
    ));

    let permissive = CryptoModule::with_default_policy();
    let key_set = permissive.generate_key_set(AlgorithmTag::NistP256).unwrap();
    let signature = permissive
        .sign(b"m", AlgorithmTag::NistP256, key_set.private_key())
        .unwrap();
    assert!(matches!(
        module.verify(&signature, b"m", AlgorithmTag::NistP256, key_set.public_key()),
        Err(CryptoError::PolicyViolation(_))
    ));
}

#[test]
fn mismatched_key_tags_are_parameter_errors() {
    let module = CryptoModule::with_default_policy();
    let ed = module.generate_key_set(AlgorithmTag::Ed25519).unwrap();
    assert!(matches!(
        module.sign(b"m", AlgorithmTag::NistP256, ed.private_key()),
        Err(CryptoError::InvalidParameter(_))
    ));
}

#[test]
fn unknown_operations_are_unsupported() {
    let module = CryptoModule::with_default_policy();
    assert!(matches!(
        module.generate_key_set(AlgorithmTag::Sha256),
        Err(CryptoError::Unsupported(_))
    ));
}

#[test]
fn hashing_dispatches_and_respects_policy() {
    let module = CryptoModule::with_default_policy();
    assert_eq!(module.hash(b"x", AlgorithmTag::Sha384).unwrap().len(), 48);

    let mut policy = CryptoPolicy::permit_all();
    policy.accepted_hash.remove(&AlgorithmTag::Sha512);
    let restricted = CryptoModule::new(policy).unwrap();
    assert!(matches!(
        restricted.hash(b"x", AlgorithmTag::Sha512),
        Err(CryptoError::PolicyViolation(_))
    ));
}

#[test]
fn policy_store_wiring() {
    let store = StaticPolicyStore(CryptoPolicy::permit_all());
    let module = CryptoModule::from_store(&store).unwrap();
    assert_eq!(module.policy().version, 1);

    let mut invalid = CryptoPolicy::permit_all();
    invalid.accepted_kem.clear();
    assert!(CryptoModule::from_store(&StaticPolicyStore(invalid)).is_err());
}

#[test]
fn batch_verification_applies_policy_per_element() {
    let mut policy = CryptoPolicy::permit_all();
    policy.accepted_signature.remove(&AlgorithmTag::NistP256);
    policy.required_signature.remove(&AlgorithmTag::NistP256);
    let module = CryptoModule::new(policy).unwrap();

    let permissive = CryptoModule::with_default_policy();
    let ed = permissive.generate_key_set(AlgorithmTag::Ed25519).unwrap();
    let p256 = permissive.generate_key_set(AlgorithmTag::NistP256).unwrap();
    let message = b"batch under policy".as_slice();
    let ed_sig = permissive
        .sign(message, AlgorithmTag::Ed25519, ed.private_key())
        .unwrap();
    let p256_sig = permissive
        .sign(message, AlgorithmTag::NistP256, p256.private_key())
        .unwrap();

    let items: Vec<(&[u8], &[u8], &[u8], AlgorithmTag)> = vec![
        (ed.public_key().as_bytes(), message, &ed_sig, AlgorithmTag::Ed25519),
        (p256.public_key().as_bytes(), message, &p256_sig, AlgorithmTag::NistP256),
    ];
    // A cryptographically valid signature under a refused algorithm is false.
    assert_eq!(module.verify_batch(&items).unwrap(), vec![true, false]);
    assert_eq!(permissive.verify_batch(&items).unwrap(), vec![true, true]);
}

#[test]
fn module_is_shareable_across_threads() {
    let module = std::sync::Arc::new(CryptoModule::with_default_policy());
    let mut handles = Vec::new();
    for i in 0..4u8 {
        let module = module.clone();
        handles.push(std::thread::spawn(move || {
            let key_set = module.generate_key_set(AlgorithmTag::Ed25519).unwrap();
            let message = vec![i; 16];
            let signature = module
                .sign(&message, AlgorithmTag::Ed25519, key_set.private_key())
                .unwrap();
            module
                .verify(&signature, &message, AlgorithmTag::Ed25519, key_set.public_key())
                .unwrap();
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}
