//! Warp message codecs: envelope framing, typed P-Chain payloads,
//! ValidationID derivation and registration justifications.

pub mod access_list;
pub mod builder;
pub mod conversion;
pub mod justification;
pub mod message;
pub mod payload;
pub mod validation_id;
pub mod wire;

pub use access_list::{warp_storage_keys, STORAGE_KEY_LEN};
pub use builder::{
    pack_l1_validator_registration_message, pack_l1_validator_weight_message,
    pack_register_l1_validator_message, pack_subnet_to_l1_conversion_message,
    pack_validation_uptime_message, pack_warp_payload_message, wrap_payload,
};
pub use conversion::{conversion_id, marshal_conversion_data};
pub use justification::{
    encode_bootstrap_derivation, encode_original_message, RegistrationJustification,
};
pub use message::{
    addressed_call_type_id, decode_addressed_call_payload, decode_unsigned_message,
    encode_addressed_call, encode_unsigned_message, AddressedCall, UnsignedMessage,
    ADDRESSED_CALL_TYPE_ID, CODEC_VERSION,
};
pub use payload::{
    pack_l1_validator_registration, pack_l1_validator_weight, pack_register_l1_validator,
    pack_subnet_to_l1_conversion, pack_validation_uptime, unpack_l1_validator_registration,
    unpack_l1_validator_weight, unpack_register_l1_validator, unpack_subnet_to_l1_conversion,
    unpack_validation_uptime, PayloadKind, WarpPayload, L1_VALIDATOR_REGISTRATION_TYPE_ID,
    L1_VALIDATOR_WEIGHT_TYPE_ID, REGISTER_L1_VALIDATOR_TYPE_ID, SUBNET_TO_L1_CONVERSION_TYPE_ID,
    VALIDATION_UPTIME_TYPE_ID,
};
pub use validation_id::{
    bootstrap_derivation, bootstrap_validation_id, calculate_validation_id,
    validation_id_of_payload,
};
