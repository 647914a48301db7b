// Path: crates/crypto/src/sign/hybrid/tests/mod.rs
use super::*;
use crate::sign::generate_keypair_bytes;

struct Fixture {
    message: Vec<u8>,
    classical_pk: Vec<u8>,
    container: HybridSignature,
    address: WalletAddress,
}

fn fixture() -> Fixture {
    let message = b"hybrid transition attestation".to_vec();
    let (classical_pk, classical_sk) = generate_keypair_bytes(AlgorithmTag::Ed25519).unwrap();
    let (pqc_pk, pqc_sk) = generate_keypair_bytes(AlgorithmTag::MlDsa65).unwrap();
    let container = hybrid_sign(
        &message,
        AlgorithmTag::Ed25519,
        &classical_sk,
        AlgorithmTag::MlDsa65,
        &pqc_sk,
    )
    .unwrap();

    let network_tag = 0x10;
    let mut preimage = vec![network_tag];
    preimage.extend_from_slice(&pqc_pk);
    let address = WalletAddress::new(HRP_PQC, network_tag, sha256(&preimage)).unwrap();

    Fixture {
        message,
        classical_pk,
        container,
        address,
    }
}

#[test]
fn strict_accepts_both_valid_halves() {
    let f = fixture();
    hybrid_verify(
        &f.container,
        &f.message,
        Some(&f.classical_pk),
        Some(&f.address),
        HybridVerificationMode::Strict,
    )
    .unwrap();
}

#[test]
fn strict_rejects_single_half_even_if_it_verifies() {
    let f = fixture();

    let classical_only = HybridSignature {
        pqc: None,
        pqc_algorithm: None,
        witness_public_key: None,
        ..f.container.clone()
    };
    assert!(matches!(
        hybrid_verify(
            &classical_only,
            &f.message,
            Some(&f.classical_pk),
            None,
            HybridVerificationMode::Strict,
        ),
        Err(CryptoError::InvalidSignature)
    ));

    let pqc_only = HybridSignature {
        classical: None,
        classical_algorithm: None,
        ..f.container.clone()
    };
    assert!(matches!(
        hybrid_verify(
            &pqc_only,
            &f.message,
            None,
            Some(&f.address),
            HybridVerificationMode::Strict,
        ),
        Err(CryptoError::InvalidSignature)
    ));
}

#[test]
fn permissive_accepts_single_valid_half() {
    let f = fixture();

    let classical_only = HybridSignature {
        pqc: None,
        pqc_algorithm: None,
        witness_public_key: None,
        ..f.container.clone()
    };
    hybrid_verify(
        &classical_only,
        &f.message,
        Some(&f.classical_pk),
        None,
        HybridVerificationMode::Permissive,
    )
    .unwrap();

    let pqc_only = HybridSignature {
        classical: None,
        classical_algorithm: None,
        ..f.container.clone()
    };
    hybrid_verify(
        &pqc_only,
        &f.message,
        None,
        Some(&f.address),
        HybridVerificationMode::Permissive,
    )
    .unwrap();
}

#[test]
fn permissive_rejects_when_any_present_half_fails() {
    let f = fixture();
    // Corrupt the classical half; the valid PQC half must not rescue it.
    let mut tampered = f.container.clone();
    tampered.classical = Some(BASE64.encode([0u8; 64]));
    assert!(matches!(
        hybrid_verify(
            &tampered,
            &f.message,
            Some(&f.classical_pk),
            Some(&f.address),
            HybridVerificationMode::Permissive,
        ),
        Err(CryptoError::InvalidSignature)
    ));
}

#[test]
fn tampered_message_rejects_in_both_modes() {
    let f = fixture();
    for mode in [
        HybridVerificationMode::Strict,
        HybridVerificationMode::Permissive,
    ] {
        assert!(hybrid_verify(
            &f.container,
            b"some other message",
            Some(&f.classical_pk),
            Some(&f.address),
            mode,
        )
        .is_err());
    }
}

#[test]
fn witness_key_must_match_address_commitment() {
    let f = fixture();
    // An address bound to a different key.
    let other_address = WalletAddress::new(HRP_PQC, 0x10, [0xEE; 32]).unwrap();
    assert!(matches!(
        hybrid_verify(
            &f.container,
            &f.message,
            Some(&f.classical_pk),
            Some(&other_address),
            HybridVerificationMode::Strict,
        ),
        Err(CryptoError::InvalidSignature)
    ));
}

#[test]
fn witness_binding_helper() {
    let f = fixture();
    let witness = BASE64
        .decode(f.container.witness_public_key.as_deref().unwrap())
        .unwrap();
    assert!(witness_binds_address(&f.address, &witness));
    assert!(!witness_binds_address(&f.address, &witness[1..]));

    let ws1 = WalletAddress::new("ws1", 0x10, f.address.hash).unwrap();
    assert!(!witness_binds_address(&ws1, &witness));
}

#[test]
fn missing_classical_key_rejects() {
    let f = fixture();
    assert!(matches!(
        hybrid_verify(
            &f.container,
            &f.message,
            None,
            Some(&f.address),
            HybridVerificationMode::Strict,
        ),
        Err(CryptoError::InvalidSignature)
    ));
}

#[test]
fn structurally_invalid_container_rejects() {
    let f = fixture();
    let mut broken = f.container.clone();
    broken.witness_public_key = None;
    assert!(matches!(
        hybrid_verify(
            &broken,
            &f.message,
            Some(&f.classical_pk),
            None,
            HybridVerificationMode::Permissive,
        ),
        Err(CryptoError::InvalidSignature)
    ));
}

#[test]
fn sign_rejects_misclassified_tags() {
    let (_, sk) = generate_keypair_bytes(AlgorithmTag::Ed25519).unwrap();
    let (_, pqc_sk) = generate_keypair_bytes(AlgorithmTag::MlDsa65).unwrap();
    assert!(hybrid_sign(b"m", AlgorithmTag::MlDsa65, &pqc_sk, AlgorithmTag::MlDsa65, &pqc_sk).is_err());
    assert!(hybrid_sign(b"m", AlgorithmTag::Ed25519, &sk, AlgorithmTag::Ed25519, &sk).is_err());
}

#[test]
fn container_json_survives_verification_round_trip() {
    let f = fixture();
    let json = f.container.to_json().unwrap();
    assert!(HybridSignature::is_hybrid_format(&json));
    let parsed = HybridSignature::from_json(&json).unwrap();
    hybrid_verify(
        &parsed,
        &f.message,
        Some(&f.classical_pk),
        Some(&f.address),
        HybridVerificationMode::Strict,
    )
    .unwrap();
}
