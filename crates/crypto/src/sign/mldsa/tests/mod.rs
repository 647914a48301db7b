// Path: crates/crypto/src/sign/mldsa/tests/mod.rs
use super::*;

#[test]
fn sign_verify_round_trip() {
    let keypair = MlDsa65KeyPair::generate().unwrap();
    let message = "test data for ML-DSA-65 signing".as_bytes();
    let signature = keypair.sign(message).unwrap();

    assert_eq!(signature.to_bytes().len(), MLDSA65_SIGNATURE_LEN);
    assert_eq!(keypair.public_key().to_bytes().len(), MLDSA65_PUBLIC_KEY_LEN);
    assert!(keypair.public_key().verify(message, &signature).is_ok());
    assert!(keypair.public_key().verify(b"wrong", &signature).is_err());
}

#[test]
fn signing_is_deterministic() {
    let keypair = MlDsa65KeyPair::generate().unwrap();
    let message = b"same message";
    assert_eq!(
        keypair.sign(message).unwrap().to_bytes(),
        keypair.sign(message).unwrap().to_bytes()
    );
}

#[test]
fn tampered_signature_is_rejected() {
    let keypair = MlDsa65KeyPair::generate().unwrap();
    let message = b"tamper target";
    let mut sig = keypair.sign(message).unwrap().to_bytes();
    sig[1500] ^= 0x04;
    // Either the flipped byte breaks decoding or verification must fail.
    if let Ok(parsed) = MlDsa65Signature::from_bytes(&sig) {
        assert!(keypair.public_key().verify(message, &parsed).is_err());
    }
}

#[test]
fn public_key_derivation_matches_generated() {
    let keypair = MlDsa65KeyPair::generate().unwrap();
    let derived = keypair.private_key().derive_public().unwrap();
    assert_eq!(derived.to_bytes(), keypair.public_key().to_bytes());
}

#[test]
fn seed_round_trip_reproduces_the_pair() {
    let keypair = MlDsa65KeyPair::generate().unwrap();
    let seed = keypair.private_key().to_bytes();
    assert_eq!(seed.len(), MLDSA65_SEED_LEN);

    let restored = MlDsa65PrivateKey::from_bytes(&seed).unwrap();
    let rebuilt = MlDsa65KeyPair::from_private_key(&restored).unwrap();
    assert_eq!(
        rebuilt.public_key().to_bytes(),
        keypair.public_key().to_bytes()
    );

    let message = b"restored seed";
    let signature = restored.sign(message).unwrap();
    assert!(keypair.public_key().verify(message, &signature).is_ok());
}

#[test]
fn wrong_key_size_detection() {
    assert!(MlDsa65PublicKey::from_bytes(&vec![0u8; 1000]).is_err());
    assert!(MlDsa65PrivateKey::from_bytes(&[0u8; 31]).is_err());
    assert!(MlDsa65Signature::from_bytes(&vec![0u8; 3293]).is_err());
}
