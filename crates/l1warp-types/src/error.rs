//! Error types for wire decoding and identifier parsing.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("read of {needed} bytes at offset {offset} exceeds buffer of {len} bytes")]
    Bounds {
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("invalid codec version {0}")]
    InvalidCodecVersion(u16),
    #[error("invalid type id for {kind}: expected {expected}, got {actual}")]
    InvalidTypeId {
        kind: &'static str,
        expected: u32,
        actual: u32,
    },
    #[error("invalid length for {kind}: expected {expected}, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid boolean flag {0}")]
    InvalidFlag(u8),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid length for {kind}: expected {expected}, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid cb58: {0}")]
    InvalidCb58(String),
    #[error("cb58 checksum mismatch")]
    InvalidChecksum,
    #[error("invalid node id `{0}`: expected NodeID-<cb58>")]
    InvalidNodeId(String),
}
