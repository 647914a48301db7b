// Path: crates/crypto/src/kem/mlkem/tests/mod.rs
use super::*;
use sorcha_api::crypto::KeyEncapsulation;

#[test]
fn keypair_has_fips_203_sizes() {
    let kem = MlKem768Kem::new();
    let keypair = kem.generate_keypair().unwrap();
    assert_eq!(keypair.public_key.to_bytes().len(), MLKEM768_PUBLIC_KEY_LEN);
    assert_eq!(
        keypair.private_key.to_bytes().len(),
        MLKEM768_PRIVATE_KEY_LEN
    );
}

#[test]
fn matching_keys_agree_on_the_shared_secret() {
    let kem = MlKem768Kem::new();
    let keypair = kem.generate_keypair().unwrap();

    let encapsulated = kem.encapsulate(&keypair.public_key).unwrap();
    assert_eq!(encapsulated.ciphertext().len(), MLKEM768_CIPHERTEXT_LEN);
    assert_eq!(
        encapsulated.shared_secret().len(),
        MLKEM768_SHARED_SECRET_LEN
    );

    let shared_secret = kem.decapsulate(&keypair.private_key, &encapsulated).unwrap();
    assert_eq!(&*shared_secret, encapsulated.shared_secret());
}

#[test]
fn mismatched_key_yields_a_different_pseudorandom_secret() {
    let kem = MlKem768Kem::new();
    let keypair = kem.generate_keypair().unwrap();
    let other = kem.generate_keypair().unwrap();

    let encapsulated = kem.encapsulate(&keypair.public_key).unwrap();

    // Implicit rejection: decapsulation succeeds but disagrees.
    let wrong = kem.decapsulate(&other.private_key, &encapsulated).unwrap();
    assert_eq!(wrong.len(), MLKEM768_SHARED_SECRET_LEN);
    assert_ne!(&*wrong, encapsulated.shared_secret());
}

#[test]
fn serialization_round_trip() {
    let kem = MlKem768Kem::new();
    let keypair = kem.generate_keypair().unwrap();

    let pk = MlKem768PublicKey::from_bytes(&keypair.public_key.to_bytes()).unwrap();
    let sk = MlKem768PrivateKey::from_bytes(&keypair.private_key.to_bytes()).unwrap();

    let encapsulated = kem.encapsulate(&pk).unwrap();
    let restored = MlKem768Encapsulated::from_bytes(&encapsulated.to_bytes()).unwrap();
    let shared_secret = kem.decapsulate(&sk, &restored).unwrap();
    assert_eq!(&*shared_secret, encapsulated.shared_secret());
}

#[test]
fn derive_public_recovers_the_embedded_key() {
    let kem = MlKem768Kem::new();
    let keypair = kem.generate_keypair().unwrap();
    let derived = keypair.private_key.derive_public().unwrap();
    assert_eq!(derived.to_bytes(), keypair.public_key.to_bytes());
}

#[test]
fn wrong_sizes_are_rejected() {
    assert!(MlKem768PublicKey::from_bytes(&[0u8; 1183]).is_err());
    assert!(MlKem768PrivateKey::from_bytes(&[0u8; 2399]).is_err());
    assert!(MlKem768Encapsulated::from_bytes(&[0u8; 1087]).is_err());
}
