//! Marshaling of the L1 validator registration justification handed to a
//! signature aggregator alongside an L1ValidatorRegistration message.
//!
//! The wire shape is the protobuf message
//!
//! ```text
//! message L1ValidatorRegistrationJustification {
//!   oneof preimage {
//!     SubnetIDIndex convert_subnet_to_l1_tx_data = 1;
//!     bytes register_l1_validator_message = 2;
//!   }
//! }
//! message SubnetIDIndex { bytes subnet_id = 1; uint32 index = 2; }
//! ```
//!
//! emitted by hand: the schema is closed and tiny. The index field is always
//! written, including index 0.

use l1warp_types::{SubnetId, ValidationId};

use crate::validation_id::{bootstrap_validation_id, validation_id_of_payload};
use crate::wire::put_uvarint;

/// Field 1, wire type 2 (length-delimited).
const TAG_FIELD_1_BYTES: u8 = 0x0a;
/// Field 2, wire type 2 (length-delimited).
const TAG_FIELD_2_BYTES: u8 = 0x12;
/// Field 2, wire type 0 (varint).
const TAG_FIELD_2_VARINT: u8 = 0x10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationJustification {
    /// A validator set at conversion time, addressed by its position.
    BootstrapDerivation { subnet_id: Vec<u8>, index: u32 },
    /// The RegisterL1Validator payload that created the validator.
    OriginalMessage { payload: Vec<u8> },
}

impl RegistrationJustification {
    pub fn bootstrap(subnet_id: &SubnetId, index: u32) -> Self {
        Self::BootstrapDerivation {
            subnet_id: subnet_id.as_bytes().to_vec(),
            index,
        }
    }

    pub fn original(payload: Vec<u8>) -> Self {
        Self::OriginalMessage { payload }
    }

    /// ValidationID this justification proves.
    pub fn validation_id(&self) -> ValidationId {
        match self {
            Self::BootstrapDerivation { subnet_id, index } => {
                bootstrap_validation_id(subnet_id, *index)
            }
            Self::OriginalMessage { payload } => validation_id_of_payload(payload),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::BootstrapDerivation { subnet_id, index } => {
                encode_bootstrap_derivation(subnet_id, *index)
            }
            Self::OriginalMessage { payload } => encode_original_message(payload),
        }
    }
}

pub fn encode_bootstrap_derivation(subnet_id: &[u8], index: u32) -> Vec<u8> {
    let mut inner = Vec::with_capacity(subnet_id.len() + 8);
    put_length_delimited(&mut inner, TAG_FIELD_1_BYTES, subnet_id);
    inner.push(TAG_FIELD_2_VARINT);
    put_uvarint(&mut inner, u64::from(index));

    let mut out = Vec::with_capacity(inner.len() + 3);
    put_length_delimited(&mut out, TAG_FIELD_1_BYTES, &inner);
    out
}

pub fn encode_original_message(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 6);
    put_length_delimited(&mut out, TAG_FIELD_2_BYTES, payload);
    out
}

fn put_length_delimited(out: &mut Vec<u8>, tag: u8, value: &[u8]) {
    out.push(tag);
    put_uvarint(out, value.len() as u64);
    out.extend_from_slice(value);
}
