// Path: crates/crypto/src/wallet/tests/mod.rs
use super::*;
use crate::sign::generate_keypair_bytes;

#[test]
fn ws2_address_commits_to_hashed_witness_key() {
    let (pqc_pk, _) = generate_keypair_bytes(AlgorithmTag::MlDsa65).unwrap();
    let network_tag = 0x10;

    let address = address_for_key(AlgorithmTag::MlDsa65, network_tag, &pqc_pk).unwrap();
    assert_eq!(address.hrp, HRP_PQC);

    // payload hash == SHA-256(network_tag ‖ pk)
    let mut preimage = vec![network_tag];
    preimage.extend_from_slice(&pqc_pk);
    assert_eq!(address.hash, sha256(&preimage));

    let encoded = address.encode().unwrap();
    assert!(encoded.len() < 100);
    assert_eq!(WalletAddress::decode(&encoded).unwrap(), address);
    assert!(witness_binds_address(&address, &pqc_pk));
}

#[test]
fn ws1_address_embeds_ed25519_key_directly() {
    let (pk, _) = generate_keypair_bytes(AlgorithmTag::Ed25519).unwrap();
    let address = address_for_key(AlgorithmTag::Ed25519, 0x01, &pk).unwrap();
    assert_eq!(address.hrp, HRP_CLASSICAL);
    assert_eq!(address.hash.as_slice(), pk.as_slice());
}

#[test]
fn ws1_address_hashes_wider_classical_keys() {
    let (pk, _) = generate_keypair_bytes(AlgorithmTag::NistP256).unwrap();
    let address = address_for_key(AlgorithmTag::NistP256, 0x01, &pk).unwrap();
    assert_eq!(address.hrp, HRP_CLASSICAL);
    let mut preimage = vec![0x01];
    preimage.extend_from_slice(&pk);
    assert_eq!(address.hash, sha256(&preimage));
}

#[test]
fn network_tag_changes_the_commitment() {
    let (pqc_pk, _) = generate_keypair_bytes(AlgorithmTag::SlhDsa128s).unwrap();
    let a = pqc_address(0x01, &pqc_pk).unwrap();
    let b = pqc_address(0x02, &pqc_pk).unwrap();
    assert_ne!(a.hash, b.hash);
}

#[test]
fn kem_keys_do_not_bind_addresses() {
    assert!(address_for_key(AlgorithmTag::MlKem768, 0x01, &[0u8; 1184]).is_err());
}

#[test]
fn rotation_requires_the_current_witness_key() {
    let (old_pk, _) = generate_keypair_bytes(AlgorithmTag::MlDsa65).unwrap();
    let (new_pk, _) = generate_keypair_bytes(AlgorithmTag::MlDsa65).unwrap();
    let address = pqc_address(0x10, &old_pk).unwrap();

    let successor = rotate_pqc_address(&address, &old_pk, &new_pk).unwrap();
    assert_eq!(successor.network_tag, 0x10);
    assert!(witness_binds_address(&successor, &new_pk));
    assert_ne!(successor.hash, address.hash);

    // Rotating with the wrong current key is refused.
    assert!(rotate_pqc_address(&address, &new_pk, &new_pk).is_err());

    // ws1 addresses have no witness rotation.
    let (ed_pk, _) = generate_keypair_bytes(AlgorithmTag::Ed25519).unwrap();
    let ws1 = classical_address(0x10, &ed_pk).unwrap();
    assert!(rotate_pqc_address(&ws1, &ed_pk, &new_pk).is_err());
}
