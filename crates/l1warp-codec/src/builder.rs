//! Complete unsigned Warp messages for the P-Chain: payload wrapped in an
//! AddressedCall with an empty source address, then in an UnsignedMessage.

use l1warp_types::{
    BlockchainId, L1ValidatorRegistrationMessage, L1ValidatorWeightMessage,
    SubnetToL1ConversionMessage, ValidationPeriod, ValidationUptimeMessage,
};

use crate::message::{encode_addressed_call, encode_unsigned_message};
use crate::payload::{
    pack_l1_validator_registration, pack_l1_validator_weight, pack_register_l1_validator,
    pack_subnet_to_l1_conversion, pack_validation_uptime, WarpPayload,
};

pub fn wrap_payload(network_id: u32, source_chain_id: &BlockchainId, payload: &[u8]) -> Vec<u8> {
    let addressed_call = encode_addressed_call(&[], payload);
    encode_unsigned_message(network_id, source_chain_id, &addressed_call)
}

pub fn pack_warp_payload_message(
    network_id: u32,
    source_chain_id: &BlockchainId,
    payload: &WarpPayload,
) -> Vec<u8> {
    wrap_payload(network_id, source_chain_id, &payload.encode())
}

pub fn pack_register_l1_validator_message(
    network_id: u32,
    source_chain_id: &BlockchainId,
    period: &ValidationPeriod,
) -> Vec<u8> {
    wrap_payload(network_id, source_chain_id, &pack_register_l1_validator(period))
}

pub fn pack_l1_validator_registration_message(
    network_id: u32,
    source_chain_id: &BlockchainId,
    msg: &L1ValidatorRegistrationMessage,
) -> Vec<u8> {
    wrap_payload(network_id, source_chain_id, &pack_l1_validator_registration(msg))
}

pub fn pack_l1_validator_weight_message(
    network_id: u32,
    source_chain_id: &BlockchainId,
    msg: &L1ValidatorWeightMessage,
) -> Vec<u8> {
    wrap_payload(network_id, source_chain_id, &pack_l1_validator_weight(msg))
}

pub fn pack_validation_uptime_message(
    network_id: u32,
    source_chain_id: &BlockchainId,
    msg: &ValidationUptimeMessage,
) -> Vec<u8> {
    wrap_payload(network_id, source_chain_id, &pack_validation_uptime(msg))
}

pub fn pack_subnet_to_l1_conversion_message(
    network_id: u32,
    source_chain_id: &BlockchainId,
    msg: &SubnetToL1ConversionMessage,
) -> Vec<u8> {
    wrap_payload(network_id, source_chain_id, &pack_subnet_to_l1_conversion(msg))
}
