// Path: crates/crypto/src/sign/rsa/tests/mod.rs
use super::*;

// RSA-4096 keygen is expensive; generate once and exercise every property on
// the same pair.
#[test]
fn full_lifecycle() {
    let keypair = Rsa4096KeyPair::generate().unwrap();
    let message = b"legacy estate attestation";

    // Round trip
    let signature = keypair.sign(message).unwrap();
    assert_eq!(signature.to_bytes().len(), RSA_SIGNATURE_LEN);
    assert!(keypair.public_key().verify(message, &signature).is_ok());

    // Wrong message
    assert!(keypair.public_key().verify(b"forged", &signature).is_err());

    // Tampered signature
    let mut bad = signature.to_bytes();
    bad[100] ^= 0x01;
    let bad = Rsa4096Signature::from_bytes(&bad).unwrap();
    assert!(keypair.public_key().verify(message, &bad).is_err());

    // DER round trip, public and private
    let pk = Rsa4096PublicKey::from_bytes(&keypair.public_key().to_bytes()).unwrap();
    let sk = Rsa4096PrivateKey::from_bytes(&keypair.private_key().to_bytes()).unwrap();
    let signature2 = sk.sign(message).unwrap();
    assert!(pk.verify(message, &signature2).is_ok());

    // Public key derivation
    let derived = sk.derive_public().unwrap();
    assert_eq!(derived.to_bytes(), keypair.public_key().to_bytes());

    // Length checks
    assert!(Rsa4096Signature::from_bytes(&[0u8; 511]).is_err());
    assert!(Rsa4096PublicKey::from_bytes(&[0u8; 64]).is_err());
}
