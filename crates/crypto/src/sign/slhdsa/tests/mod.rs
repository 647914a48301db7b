// Path: crates/crypto/src/sign/slhdsa/tests/mod.rs
use super::*;

#[test]
fn slh128s_sign_verify_round_trip() {
    let scheme = SlhDsaScheme::new(SlhDsaVariant::Slh128s);
    let keypair = scheme.generate_keypair().unwrap();
    let message = b"witness-backed docket entry";

    let signature = keypair.sign(message).unwrap();
    assert_eq!(signature.to_bytes().len(), 7856);
    assert_eq!(keypair.public_key().to_bytes().len(), 32);
    assert!(keypair.public_key().verify(message, &signature).is_ok());
    assert!(keypair.public_key().verify(b"wrong", &signature).is_err());
}

#[test]
fn slh192s_sign_verify_round_trip() {
    let scheme = SlhDsaScheme::new(SlhDsaVariant::Slh192s);
    let keypair = scheme.generate_keypair().unwrap();
    let message = b"long-horizon archival signature";

    let signature = keypair.sign(message).unwrap();
    assert_eq!(signature.to_bytes().len(), 16_224);
    assert_eq!(keypair.public_key().to_bytes().len(), 48);
    assert!(keypair.public_key().verify(message, &signature).is_ok());
}

#[test]
fn tampered_signature_is_rejected() {
    let scheme = SlhDsaScheme::new(SlhDsaVariant::Slh128s);
    let keypair = scheme.generate_keypair().unwrap();
    let message = b"tamper target";
    let mut sig = keypair.sign(message).unwrap().to_bytes();
    sig[4000] ^= 0x10;
    let parsed = SlhDsaSignature::from_bytes(&sig).unwrap();
    assert!(keypair.public_key().verify(message, &parsed).is_err());
}

#[test]
fn public_key_derivation_matches_generated() {
    let scheme = SlhDsaScheme::new(SlhDsaVariant::Slh128s);
    let keypair = scheme.generate_keypair().unwrap();
    let derived = keypair.private_key().derive_public().unwrap();
    assert_eq!(derived.to_bytes(), keypair.public_key().to_bytes());
}

#[test]
fn key_serialization_round_trip() {
    let scheme = SlhDsaScheme::new(SlhDsaVariant::Slh128s);
    let keypair = scheme.generate_keypair().unwrap();

    let sk = SlhDsaPrivateKey::from_bytes(&keypair.private_key().to_bytes()).unwrap();
    let pk = SlhDsaPublicKey::from_bytes(&keypair.public_key().to_bytes()).unwrap();
    let message = b"restored keys";
    let signature = sk.sign(message).unwrap();
    assert!(pk.verify(message, &signature).is_ok());
}

#[test]
fn wrong_key_size_detection() {
    assert!(SlhDsaPublicKey::from_bytes(&[0u8; 40]).is_err());
    assert!(SlhDsaPrivateKey::from_bytes(&[0u8; 65]).is_err());
    assert!(SlhDsaSignature::from_bytes(&[0u8; 7857]).is_err());
}

#[test]
fn tag_and_key_material_must_agree() {
    let keypair = SlhDsaScheme::new(SlhDsaVariant::Slh128s)
        .generate_keypair()
        .unwrap();
    let sk = keypair.private_key().to_bytes();
    assert!(matches!(
        crate::sign::sign_bytes(AlgorithmTag::SlhDsa192s, b"m", &sk),
        Err(CryptoError::InvalidKey(_))
    ));
}

#[test]
fn cross_variant_verification_fails() {
    let kp128 = SlhDsaScheme::new(SlhDsaVariant::Slh128s)
        .generate_keypair()
        .unwrap();
    let kp192 = SlhDsaScheme::new(SlhDsaVariant::Slh192s)
        .generate_keypair()
        .unwrap();
    let message = b"cross variant";
    let sig128 = kp128.sign(message).unwrap();
    assert!(kp192.public_key().verify(message, &sig128).is_err());
}
