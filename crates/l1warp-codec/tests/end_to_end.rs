//! Build a registration message layer by layer, then peel it back.

use l1warp_codec::{
    calculate_validation_id, decode_addressed_call_payload, decode_unsigned_message,
    encode_addressed_call, encode_unsigned_message, pack_register_l1_validator,
    pack_register_l1_validator_message, unpack_register_l1_validator, warp_storage_keys,
    AddressedCall, PayloadKind, RegistrationJustification, UnsignedMessage, WarpPayload,
};
use l1warp_types::{BlockchainId, BlsPublicKey, NodeId, PChainOwner, SubnetId, ValidationPeriod};

const PAYLOAD_HEX: &str = concat!(
    "0000",
    "00000001",
    "0000000000000000000000000000000000000000000000000000000000000000",
    "00000004",
    "01020304",
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
    "202122232425262728292a2b2c2d2e2f",
    "00000000000003e8",
    "00000000",
    "00000000",
    "00000000",
    "00000000",
    "0000000000000005",
);

fn period() -> ValidationPeriod {
    let mut key = [0u8; 48];
    for (i, b) in key.iter_mut().enumerate() {
        *b = i as u8;
    }
    ValidationPeriod {
        subnet_id: SubnetId::new([0; 32]),
        node_id: NodeId::new(vec![1, 2, 3, 4]),
        bls_public_key: BlsPublicKey::new(key),
        registration_expiry: 1_000,
        remaining_balance_owner: PChainOwner::default(),
        disable_owner: PChainOwner::default(),
        weight: 5,
    }
}

#[test]
fn register_message_survives_both_envelopes() {
    let payload = pack_register_l1_validator(&period());
    assert_eq!(hex::encode(&payload), PAYLOAD_HEX);

    let call = encode_addressed_call(&[], &payload);
    let message = encode_unsigned_message(5, &BlockchainId::new([0; 32]), &call);
    assert_eq!(message.len(), 42 + 14 + payload.len());

    let inner = decode_unsigned_message(&message).expect("unsigned message framing");
    assert_eq!(inner, call.as_slice());
    let raw = decode_addressed_call_payload(inner).expect("addressed call framing");
    assert_eq!(raw, payload.as_slice());
    assert_eq!(unpack_register_l1_validator(raw).expect("payload"), period());
}

#[test]
fn builder_matches_manual_wrapping() {
    let chain = BlockchainId::new([0; 32]);
    let built = pack_register_l1_validator_message(5, &chain, &period());

    let strict = UnsignedMessage::decode(&built).expect("strict decode");
    assert_eq!(strict.network_id, 5);
    let call: AddressedCall = strict.addressed_call().expect("addressed call");
    assert!(call.source_address.is_empty());

    let decoded = WarpPayload::decode(PayloadKind::RegisterL1Validator, &call.payload)
        .expect("typed payload");
    assert_eq!(decoded, WarpPayload::RegisterL1Validator(period()));
    assert_eq!(decoded.kind(), PayloadKind::RegisterL1Validator);
}

#[test]
fn validation_id_and_justification_agree() {
    let payload = pack_register_l1_validator(&period());
    let id = calculate_validation_id(&period());
    assert_eq!(
        hex::encode(id.as_bytes()),
        "75c18a027321256cb6637023fd622e5ba08ff338424113e7c2be9d00ae48ee8e"
    );

    let justification = RegistrationJustification::original(payload.clone());
    assert_eq!(justification.validation_id(), id);
    let encoded = justification.encode();
    assert_eq!(encoded[0], 0x12);
    assert_eq!(encoded[1] as usize, payload.len());
    assert_eq!(&encoded[2..], payload.as_slice());
}

#[test]
fn access_list_keys_carry_the_message() {
    let chain = BlockchainId::new([0; 32]);
    let message = pack_register_l1_validator_message(5, &chain, &period());
    let keys = warp_storage_keys(&message);
    assert_eq!(keys.len(), message.len() / 32 + 1);

    let flat: Vec<u8> = keys.iter().flatten().copied().collect();
    assert_eq!(&flat[..message.len()], message.as_slice());
    assert_eq!(flat[message.len()], 0xff);
    assert!(flat[message.len() + 1..].iter().all(|b| *b == 0));
}
