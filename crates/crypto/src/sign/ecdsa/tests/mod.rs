// Path: crates/crypto/src/sign/ecdsa/tests/mod.rs
use super::*;

#[test]
fn sign_verify_round_trip() {
    let keypair = P256KeyPair::generate().unwrap();
    let message = b"validator attestation";
    let signature = keypair.sign(message).unwrap();

    assert_eq!(signature.to_bytes().len(), P256_SIGNATURE_LEN);
    assert!(keypair.public_key().verify(message, &signature).is_ok());
    assert!(keypair.public_key().verify(b"other", &signature).is_err());
}

#[test]
fn tampered_signature_is_rejected() {
    let keypair = P256KeyPair::generate().unwrap();
    let message = b"tamper target";
    let mut sig = keypair.sign(message).unwrap().to_bytes();
    sig[10] ^= 0x80;
    if let Ok(parsed) = P256Signature::from_bytes(&sig) {
        assert!(keypair.public_key().verify(message, &parsed).is_err());
    }
}

#[test]
fn wrong_key_is_rejected() {
    let keypair = P256KeyPair::generate().unwrap();
    let other = P256KeyPair::generate().unwrap();
    let message = b"cross key";
    let signature = keypair.sign(message).unwrap();
    assert!(other.public_key().verify(message, &signature).is_err());
}

#[test]
fn public_key_derivation_matches_generated() {
    let keypair = P256KeyPair::generate().unwrap();
    let derived = keypair.private_key().derive_public().unwrap();
    assert_eq!(derived.to_bytes(), keypair.public_key().to_bytes());
}

#[test]
fn serialization_round_trip() {
    let keypair = P256KeyPair::generate().unwrap();
    let pk = P256PublicKey::from_bytes(&keypair.public_key().to_bytes()).unwrap();
    let sk = P256PrivateKey::from_bytes(&keypair.private_key().to_bytes()).unwrap();
    let message = b"restored keys";
    let signature = sk.sign(message).unwrap();
    assert!(pk.verify(message, &signature).is_ok());

    assert!(P256PublicKey::from_bytes(&[2u8; 32]).is_err());
    assert!(P256PrivateKey::from_bytes(&[0u8; 31]).is_err());
    assert!(P256Signature::from_bytes(&[0u8; 63]).is_err());
}
