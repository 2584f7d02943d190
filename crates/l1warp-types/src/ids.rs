use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cb58;
use crate::error::ValidationError;

macro_rules! impl_fixed_bytes_id {
    ($name:ident, $len:expr) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
                if bytes.len() != Self::LEN {
                    return Err(ValidationError::InvalidLength {
                        kind: stringify!($name),
                        expected: Self::LEN,
                        actual: bytes.len(),
                    });
                }
                let mut out = [0u8; Self::LEN];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }

            /// Parses `0x`-prefixed (or bare) hex.
            pub fn from_hex(text: &str) -> Result<Self, ValidationError> {
                let stripped = text.strip_prefix("0x").unwrap_or(text);
                let bytes =
                    hex::decode(stripped).map_err(|e| ValidationError::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes)
            }

            pub fn from_cb58(text: &str) -> Result<Self, ValidationError> {
                Self::from_slice(&cb58::decode(text)?)
            }

            /// Accepts either `0x`-prefixed hex or cb58.
            pub fn parse(text: &str) -> Result<Self, ValidationError> {
                Self::from_slice(&cb58::decode_hex_or_cb58(text)?)
            }

            pub fn to_cb58(&self) -> String {
                cb58::encode(&self.0)
            }

            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub const fn into_inner(self) -> [u8; $len] {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; Self::LEN])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                Self::parse(text)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(value: [u8; $len]) -> Self {
                Self::new(value)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = ValidationError;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                Self::from_slice(value)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                Self::parse(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_fixed_bytes_id!(SubnetId, 32);
impl_fixed_bytes_id!(BlockchainId, 32);
impl_fixed_bytes_id!(ValidationId, 32);
impl_fixed_bytes_id!(ConversionId, 32);
impl_fixed_bytes_id!(TxHash, 32);
impl_fixed_bytes_id!(PChainAddress, 20);
impl_fixed_bytes_id!(BlsPublicKey, 48);

const NODE_ID_PREFIX: &str = "NodeID-";

/// Variable-length validator node identifier. Text form is `NodeID-<cb58>`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct NodeId(Vec<u8>);

impl NodeId {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        if let Some(body) = text.strip_prefix(NODE_ID_PREFIX) {
            return cb58::decode(body)
                .map(Self)
                .map_err(|_| ValidationError::InvalidNodeId(text.to_string()));
        }
        if let Some(stripped) = text.strip_prefix("0x") {
            return hex::decode(stripped)
                .map(Self)
                .map_err(|e| ValidationError::InvalidHex(e.to_string()));
        }
        Err(ValidationError::InvalidNodeId(text.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NODE_ID_PREFIX}{}", cb58::encode(&self.0))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({self})")
    }
}

impl FromStr for NodeId {
    type Err = ValidationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for NodeId {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
