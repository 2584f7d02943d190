//! Warp envelopes: the outer `UnsignedMessage` and the `AddressedCall` it carries.
//!
//! ```text
//! UnsignedMessage = codecVersion(u16) || networkID(u32) || sourceChainID(32) || len(u32) || addressedCall
//! AddressedCall   = codecVersion(u16) || typeID(u32)=1 || len(u32) || sourceAddress || len(u32) || payload
//! ```
//!
//! Two decode flavours exist. [`decode_unsigned_message`] and
//! [`decode_addressed_call_payload`] run over arbitrary log data and return
//! `None` for anything that does not look like our envelope. [`UnsignedMessage::decode`] and [`AddressedCall::decode`]
//! are strict and reject any deviation with a [`CodecError`].

use l1warp_types::{BlockchainId, CodecError};

use crate::wire::{put_bytes, put_u16, put_u32, read_u32_at, Reader};

pub const CODEC_VERSION: u16 = 0;
pub const ADDRESSED_CALL_TYPE_ID: u32 = 1;

/// codecVersion + networkID + sourceChainID + length prefix.
pub const UNSIGNED_MESSAGE_HEADER_LEN: usize = 2 + 4 + 32 + 4;
/// codecVersion + typeID + source address length prefix.
pub const ADDRESSED_CALL_HEADER_LEN: usize = 2 + 4 + 4;

const UNSIGNED_MESSAGE_LEN_OFFSET: usize = 38;
const ADDRESSED_CALL_TYPE_OFFSET: usize = 2;
const ADDRESSED_CALL_SOURCE_LEN_OFFSET: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedMessage {
    pub network_id: u32,
    pub source_chain_id: BlockchainId,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedCall {
    pub source_address: Vec<u8>,
    pub payload: Vec<u8>,
}

pub fn encode_addressed_call(source_address: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(ADDRESSED_CALL_HEADER_LEN + source_address.len() + 4 + payload.len());
    put_u16(&mut out, CODEC_VERSION);
    put_u32(&mut out, ADDRESSED_CALL_TYPE_ID);
    put_bytes(&mut out, source_address);
    put_bytes(&mut out, payload);
    out
}

pub fn encode_unsigned_message(
    network_id: u32,
    source_chain_id: &BlockchainId,
    addressed_call: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(UNSIGNED_MESSAGE_HEADER_LEN + addressed_call.len());
    put_u16(&mut out, CODEC_VERSION);
    put_u32(&mut out, network_id);
    out.extend_from_slice(source_chain_id.as_bytes());
    put_bytes(&mut out, addressed_call);
    out
}

/// Returns the AddressedCall bytes inside an UnsignedMessage, or `None` if the
/// buffer is shorter than the header or the declared length is zero or runs
/// past the end. Bytes after the declared length are ignored.
pub fn decode_unsigned_message(message: &[u8]) -> Option<&[u8]> {
    if message.len() < UNSIGNED_MESSAGE_HEADER_LEN {
        return None;
    }
    let len = read_u32_at(message, UNSIGNED_MESSAGE_LEN_OFFSET).ok()? as usize;
    if len == 0 {
        return None;
    }
    let end = UNSIGNED_MESSAGE_HEADER_LEN.checked_add(len)?;
    message.get(UNSIGNED_MESSAGE_HEADER_LEN..end)
}

/// Type ID embedded in an AddressedCall, without validating the rest.
pub fn addressed_call_type_id(addressed_call: &[u8]) -> Option<u32> {
    read_u32_at(addressed_call, ADDRESSED_CALL_TYPE_OFFSET).ok()
}

/// Returns the payload inside an AddressedCall, or `None` on any bounds
/// violation or a zero-length payload.
pub fn decode_addressed_call_payload(addressed_call: &[u8]) -> Option<&[u8]> {
    if addressed_call.len() < ADDRESSED_CALL_HEADER_LEN {
        return None;
    }
    let source_len = read_u32_at(addressed_call, ADDRESSED_CALL_SOURCE_LEN_OFFSET).ok()? as usize;
    let payload_len_offset = ADDRESSED_CALL_HEADER_LEN.checked_add(source_len)?;
    let payload_len = read_u32_at(addressed_call, payload_len_offset).ok()? as usize;
    if payload_len == 0 {
        return None;
    }
    let start = payload_len_offset + 4;
    addressed_call.get(start..start.checked_add(payload_len)?)
}

impl AddressedCall {
    pub fn new(source_address: Vec<u8>, payload: Vec<u8>) -> Self {
        Self {
            source_address,
            payload,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_addressed_call(&self.source_address, &self.payload)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(bytes);
        let version = reader.read_u16()?;
        if version != CODEC_VERSION {
            return Err(CodecError::InvalidCodecVersion(version));
        }
        let type_id = reader.read_u32()?;
        if type_id != ADDRESSED_CALL_TYPE_ID {
            return Err(CodecError::InvalidTypeId {
                kind: "AddressedCall",
                expected: ADDRESSED_CALL_TYPE_ID,
                actual: type_id,
            });
        }
        let source_address = reader.read_bytes()?.to_vec();
        let payload = reader.read_bytes()?.to_vec();
        reader.finish("AddressedCall")?;
        Ok(Self {
            source_address,
            payload,
        })
    }
}

impl UnsignedMessage {
    pub fn new(network_id: u32, source_chain_id: BlockchainId, payload: Vec<u8>) -> Self {
        Self {
            network_id,
            source_chain_id,
            payload,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_unsigned_message(self.network_id, &self.source_chain_id, &self.payload)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(bytes);
        let version = reader.read_u16()?;
        if version != CODEC_VERSION {
            return Err(CodecError::InvalidCodecVersion(version));
        }
        let network_id = reader.read_u32()?;
        let source_chain_id = BlockchainId::new(reader.read_array::<32>()?);
        let payload = reader.read_bytes()?.to_vec();
        reader.finish("UnsignedMessage")?;
        Ok(Self {
            network_id,
            source_chain_id,
            payload,
        })
    }

    /// Strictly decodes the carried AddressedCall.
    pub fn addressed_call(&self) -> Result<AddressedCall, CodecError> {
        AddressedCall::decode(&self.payload)
    }
}
