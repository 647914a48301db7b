// Path: crates/crypto/src/sign/bls/tests/mod.rs
use super::threshold::*;
use super::*;

#[test]
fn test_bls_sign_verify() {
    let keypair = BlsKeyPair::generate().unwrap();
    let message = b"register head attestation";
    let signature = keypair.sign(message).unwrap();

    assert_eq!(signature.to_bytes().len(), BLS_SIGNATURE_LEN);
    assert!(keypair.public_key().verify(message, &signature).is_ok());
    assert!(keypair.public_key().verify(b"wrong", &signature).is_err());

    // Serialization roundtrip
    let pk_bytes = keypair.public_key().to_bytes();
    let restored_pk = BlsPublicKey::from_bytes(&pk_bytes).unwrap();
    assert_eq!(keypair.public_key(), restored_pk);
}

#[test]
fn derive_public_matches_generated() {
    let keypair = BlsKeyPair::generate().unwrap();
    let derived = keypair.private_key().derive_public().unwrap();
    assert_eq!(derived, keypair.public_key());
}

#[test]
fn malformed_points_are_rejected() {
    assert!(BlsPublicKey::from_bytes(&[0xFFu8; 96]).is_err());
    assert!(BlsSignature::from_bytes(&[0xFFu8; 48]).is_err());
    assert!(BlsPublicKey::from_bytes(&[0u8; 95]).is_err());
    assert!(BlsPrivateKey::from_bytes(&[0xFFu8; 32]).is_err());
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn two_of_three_aggregation_is_subset_independent() {
    let key_set =
        generate_threshold_key_shares(2, 3, &ids(&["v1", "v2", "v3"])).unwrap();
    let message = b"test-docket-hash-001";

    let partials: Vec<_> = key_set
        .shares
        .iter()
        .map(|share| share.sign_partial(message).unwrap())
        .collect();

    let agg12 = aggregate(&partials[..2], &[1, 2], 2, 3).unwrap();
    assert_eq!(agg12.bitfield, vec![0b0000_0011]);

    let agg13 = aggregate(
        &[partials[0].clone(), partials[2].clone()],
        &[1, 3],
        2,
        3,
    )
    .unwrap();
    let agg23 = aggregate(
        &[partials[1].clone(), partials[2].clone()],
        &[2, 3],
        2,
        3,
    )
    .unwrap();

    // Any t-subset recombines to the identical group signature.
    assert_eq!(agg12.signature, agg13.signature);
    assert_eq!(agg13.signature, agg23.signature);

    for agg in [&agg12, &agg13, &agg23] {
        verify_aggregate(agg, &key_set.group_public_key, message).unwrap();
    }
}

#[test]
fn bitfield_uses_low_bit_for_share_one() {
    let key_set =
        generate_threshold_key_shares(2, 5, &ids(&["a", "b", "c", "d", "e"])).unwrap();
    let message = b"bitfield convention";
    let p2 = key_set.shares[1].sign_partial(message).unwrap();
    let p4 = key_set.shares[3].sign_partial(message).unwrap();
    let agg = aggregate(&[p2, p4], &[2, 4], 2, 5).unwrap();
    assert_eq!(agg.bitfield, vec![0b0000_1010]);
    verify_aggregate(&agg, &key_set.group_public_key, message).unwrap();
}

#[test]
fn below_threshold_aggregate_fails_verification() {
    // 3-of-5 committee; two partials recombined with a declared threshold of 2
    // form a well-structured aggregate that cannot satisfy the pairing check
    // against the group key.
    let key_set =
        generate_threshold_key_shares(3, 5, &ids(&["a", "b", "c", "d", "e"])).unwrap();
    let message = b"deficient quorum";
    let p1 = key_set.shares[0].sign_partial(message).unwrap();
    let p2 = key_set.shares[1].sign_partial(message).unwrap();

    let agg = aggregate(&[p1, p2], &[1, 2], 2, 5).unwrap();
    assert_eq!(agg.signature.to_bytes().len(), BLS_SIGNATURE_LEN);
    assert!(verify_aggregate(&agg, &key_set.group_public_key, message).is_err());
}

#[test]
fn aggregation_input_validation() {
    let key_set = generate_threshold_key_shares(2, 3, &ids(&["a", "b", "c"])).unwrap();
    let message = b"validation";
    let p1 = key_set.shares[0].sign_partial(message).unwrap();
    let p2 = key_set.shares[1].sign_partial(message).unwrap();

    // Fewer partials than the declared threshold
    assert!(aggregate(&[p1.clone()], &[1], 2, 3).is_err());
    // Mismatched lengths
    assert!(aggregate(&[p1.clone(), p2.clone()], &[1], 2, 3).is_err());
    // Out-of-range index
    assert!(aggregate(&[p1.clone(), p2.clone()], &[1, 4], 2, 3).is_err());
    // Duplicate indices
    assert!(aggregate(&[p1.clone(), p2], &[1, 1], 2, 3).is_err());
    // Threshold above committee size
    assert!(aggregate(&[p1], &[1], 4, 3).is_err());
}

#[test]
fn keygen_input_validation() {
    assert!(generate_threshold_key_shares(0, 3, &ids(&["a", "b", "c"])).is_err());
    assert!(generate_threshold_key_shares(4, 3, &ids(&["a", "b", "c"])).is_err());
    assert!(generate_threshold_key_shares(2, 3, &ids(&["a", "b"])).is_err());
}

#[test]
fn partial_signatures_verify_against_public_shares() {
    let key_set = generate_threshold_key_shares(2, 3, &ids(&["a", "b", "c"])).unwrap();
    let message = b"audit partials";
    for share in &key_set.shares {
        let partial = share.sign_partial(message).unwrap();
        assert!(share.public_share.verify(message, &partial).is_ok());
        // A partial is not the group signature.
        assert!(verify_aggregate(
            &BlsAggregateSignature {
                signature: partial,
                bitfield: vec![1u8 << (share.index - 1)],
                threshold: 1,
                total: 3,
            },
            &key_set.group_public_key,
            message,
        )
        .is_err());
    }
}

#[test]
fn tampered_aggregate_fails() {
    let key_set = generate_threshold_key_shares(2, 3, &ids(&["a", "b", "c"])).unwrap();
    let message = b"tamper matrix";
    let partials: Vec<_> = key_set
        .shares
        .iter()
        .take(2)
        .map(|s| s.sign_partial(message).unwrap())
        .collect();
    let agg = aggregate(&partials, &[1, 2], 2, 3).unwrap();

    // Tampered message
    assert!(verify_aggregate(&agg, &key_set.group_public_key, b"tamper matrix!").is_err());

    // Tampered group key: use a different committee's key
    let other = generate_threshold_key_shares(2, 3, &ids(&["x", "y", "z"])).unwrap();
    assert!(verify_aggregate(&agg, &other.group_public_key, message).is_err());

    // Tampered signature bytes: flip one bit and re-parse; most flips break
    // the point encoding, the rest must fail the pairing.
    let mut sig_bytes = agg.signature.to_bytes();
    sig_bytes[20] ^= 0x01;
    if let Ok(tampered) = BlsSignature::from_bytes(&sig_bytes) {
        let tampered_agg = BlsAggregateSignature {
            signature: tampered,
            ..agg.clone()
        };
        assert!(verify_aggregate(&tampered_agg, &key_set.group_public_key, message).is_err());
    }
}

#[test]
fn key_share_wire_round_trip() {
    let key_set = generate_threshold_key_shares(2, 3, &ids(&["alpha", "beta", "gamma"])).unwrap();
    let message = b"dealt share";
    for share in &key_set.shares {
        let bytes = share.to_bytes();
        let parsed = BlsKeyShare::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.index, share.index);
        assert_eq!(parsed.validator_id, share.validator_id);
        assert_eq!(parsed.public_share, share.public_share);

        let partial = parsed.sign_partial(message).unwrap();
        assert!(share.public_share.verify(message, &partial).is_ok());
    }

    // A record whose public share disagrees with the secret is rejected.
    let mut bytes = key_set.shares[0].to_bytes();
    let other = key_set.shares[1].public_share.to_bytes();
    bytes[4 + 32..4 + 32 + 96].copy_from_slice(&other);
    assert!(BlsKeyShare::from_bytes(&bytes).is_err());
}

#[test]
fn aggregate_wire_round_trip() {
    let key_set = generate_threshold_key_shares(2, 3, &ids(&["a", "b", "c"])).unwrap();
    let message = b"wire form";
    let partials: Vec<_> = key_set
        .shares
        .iter()
        .take(2)
        .map(|s| s.sign_partial(message).unwrap())
        .collect();
    let agg = aggregate(&partials, &[1, 2], 2, 3).unwrap();

    let bytes = agg.to_bytes();
    assert_eq!(bytes.len(), BLS_SIGNATURE_LEN + 1 + 8);
    let parsed = BlsAggregateSignature::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, agg);

    assert!(BlsAggregateSignature::from_bytes(&bytes[..10]).is_err());
}

#[test]
fn group_key_binds_to_constant_term() {
    // Interpolating the share secrets at zero must reproduce the key the
    // dealer published.
    let key_set = generate_threshold_key_shares(3, 5, &ids(&["a", "b", "c", "d", "e"])).unwrap();
    let message = b"constant term check";
    let partials: Vec<_> = key_set
        .shares
        .iter()
        .take(3)
        .map(|s| s.sign_partial(message).unwrap())
        .collect();
    let agg = aggregate(&partials, &[1, 2, 3], 3, 5).unwrap();
    verify_aggregate(&agg, &key_set.group_public_key, message).unwrap();
}
