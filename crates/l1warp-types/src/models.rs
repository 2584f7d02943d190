//! Value models carried inside Warp message payloads.

use serde::{Deserialize, Serialize};

use crate::ids::{
    BlockchainId, BlsPublicKey, ConversionId, NodeId, PChainAddress, SubnetId, ValidationId,
};

/// P-Chain multisig owner. Address order is part of the wire encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PChainOwner {
    pub threshold: u32,
    pub addresses: Vec<PChainAddress>,
}

/// Body of a RegisterL1Validator message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPeriod {
    pub subnet_id: SubnetId,
    pub node_id: NodeId,
    pub bls_public_key: BlsPublicKey,
    pub registration_expiry: u64,
    pub remaining_balance_owner: PChainOwner,
    pub disable_owner: PChainOwner,
    pub weight: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetToL1ConversionMessage {
    pub conversion_id: ConversionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1ValidatorRegistrationMessage {
    pub validation_id: ValidationId,
    pub registered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1ValidatorWeightMessage {
    pub validation_id: ValidationId,
    pub nonce: u64,
    pub weight: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationUptimeMessage {
    pub validation_id: ValidationId,
    pub uptime_seconds: u64,
}

/// One initial validator in a subnet-to-L1 conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionValidator {
    pub node_id: NodeId,
    pub bls_public_key: BlsPublicKey,
    pub weight: u64,
}

/// Data hashed into the conversion ID of a SubnetToL1Conversion message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetToL1ConversionData {
    pub subnet_id: SubnetId,
    pub manager_chain_id: BlockchainId,
    #[serde(with = "hex::serde")]
    pub manager_address: Vec<u8>,
    pub validators: Vec<ConversionValidator>,
}
