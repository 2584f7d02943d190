//! cb58: Base58 with a 4-byte SHA-256 checksum suffix, as used for Avalanche IDs.

use sha2::{Digest, Sha256};

use crate::error::ValidationError;

pub const CHECKSUM_LEN: usize = 4;

/// Last four bytes of `sha256(payload)`.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest: [u8; 32] = Sha256::digest(payload).into();
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[32 - CHECKSUM_LEN..]);
    out
}

pub fn encode(payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&checksum(payload));
    bs58::encode(buf).into_string()
}

pub fn decode(text: &str) -> Result<Vec<u8>, ValidationError> {
    let raw = bs58::decode(text)
        .into_vec()
        .map_err(|e| ValidationError::InvalidCb58(e.to_string()))?;
    if raw.len() < CHECKSUM_LEN {
        return Err(ValidationError::InvalidCb58(format!(
            "decoded {} bytes, shorter than checksum",
            raw.len()
        )));
    }
    let (payload, sum) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum(payload) != sum {
        return Err(ValidationError::InvalidChecksum);
    }
    Ok(payload.to_vec())
}

/// Decodes `0x`-prefixed hex, or cb58 otherwise.
pub fn decode_hex_or_cb58(text: &str) -> Result<Vec<u8>, ValidationError> {
    match text.strip_prefix("0x") {
        Some(stripped) => {
            hex::decode(stripped).map_err(|e| ValidationError::InvalidHex(e.to_string()))
        }
        None => decode(text),
    }
}
