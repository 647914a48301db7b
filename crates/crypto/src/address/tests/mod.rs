// Path: crates/crypto/src/address/tests/mod.rs
use super::*;

#[test]
fn bech32m_round_trip() {
    for len in [1usize, 20, 32, 33, 40] {
        let data: Vec<u8> = (0..len as u8).collect();
        for hrp in [HRP_CLASSICAL, HRP_PQC] {
            let encoded = encode_bech32m(hrp, &data).unwrap();
            let (decoded_hrp, decoded) = decode_bech32m(&encoded).unwrap();
            assert_eq!(decoded_hrp, hrp);
            assert_eq!(decoded, data);
        }
    }
}

#[test]
fn checksum_variants_are_mutually_exclusive() {
    let data = [0x7Eu8; 33];
    let legacy = encode_bech32("ws1", &data).unwrap();
    let modern = encode_bech32m("ws1", &data).unwrap();
    assert_ne!(legacy, modern);
    assert!(decode_bech32m(&legacy).is_err());
    assert!(decode_bech32(&modern).is_err());
}

#[test]
fn corrupt_character_fails_checksum() {
    let encoded = encode_bech32m("ws2", &[0x11; 33]).unwrap();
    let mut corrupted: Vec<char> = encoded.chars().collect();
    let last = corrupted.len() - 1;
    corrupted[last] = if corrupted[last] == 'q' { 'p' } else { 'q' };
    let corrupted: String = corrupted.into_iter().collect();
    assert!(decode_bech32m(&corrupted).is_err());
}

#[test]
fn mixed_case_is_rejected() {
    let encoded = encode_bech32m("ws1", &[0x22; 33]).unwrap();
    let mut mixed = encoded.clone();
    mixed.replace_range(0..1, "W");
    assert!(decode_bech32m(&mixed).is_err());
}

#[test]
fn truncated_string_is_rejected() {
    let encoded = encode_bech32m("ws1", &[0x33; 33]).unwrap();
    let truncated = &encoded[..encoded.len() - 3];
    assert!(decode_bech32m(truncated).is_err());
    assert!(decode_bech32m("ws1").is_err());
    assert!(decode_bech32m("").is_err());
}

#[test]
fn unknown_hrp_passes_through_raw_decode() {
    let encoded = encode_bech32m("other", &[0x44; 10]).unwrap();
    let (hrp, data) = decode_bech32m(&encoded).unwrap();
    assert_eq!(hrp, "other");
    assert_eq!(data, vec![0x44; 10]);
    // but a wallet address it is not
    assert!(WalletAddress::decode(&encoded).is_err());
}

#[test]
fn wallet_address_round_trip() {
    let addr = WalletAddress::new(HRP_PQC, 0x10, [0x5A; 32]).unwrap();
    let encoded = addr.encode().unwrap();
    assert!(encoded.starts_with("ws21"));
    assert!(encoded.len() < MAX_ADDRESS_LEN);
    let decoded = WalletAddress::decode(&encoded).unwrap();
    assert_eq!(decoded, addr);
}

#[test]
fn wallet_address_rejects_bad_payload_length() {
    let encoded = encode_bech32m("ws1", &[0x01; 20]).unwrap();
    assert!(WalletAddress::decode(&encoded).is_err());
}

#[test]
fn wallet_address_rejects_unknown_hrp_at_construction() {
    assert!(WalletAddress::new("ws9", 0, [0; 32]).is_err());
}
