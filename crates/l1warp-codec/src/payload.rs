//! Typed payload codecs carried inside an AddressedCall.
//!
//! Every payload starts with `codecVersion(u16) || typeID(u32)`. Type IDs are
//! not unique across kinds: SubnetToL1Conversion and ValidationUptime both
//! use 0, so decoding always takes the expected [`PayloadKind`] from the
//! caller instead of inferring it from the bytes.
//!
//! Unpack walks the buffer field by field and requires the final offset to
//! equal the buffer length.

use l1warp_types::{
    BlsPublicKey, CodecError, ConversionId, L1ValidatorRegistrationMessage,
    L1ValidatorWeightMessage, NodeId, PChainAddress, PChainOwner, SubnetId,
    SubnetToL1ConversionMessage, ValidationId, ValidationPeriod, ValidationUptimeMessage,
};

use crate::message::CODEC_VERSION;
use crate::wire::{put_bytes, put_len, put_u16, put_u32, put_u64, put_u8, Reader};

pub const SUBNET_TO_L1_CONVERSION_TYPE_ID: u32 = 0;
pub const REGISTER_L1_VALIDATOR_TYPE_ID: u32 = 1;
pub const L1_VALIDATOR_REGISTRATION_TYPE_ID: u32 = 2;
pub const L1_VALIDATOR_WEIGHT_TYPE_ID: u32 = 3;
pub const VALIDATION_UPTIME_TYPE_ID: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    SubnetToL1Conversion,
    RegisterL1Validator,
    L1ValidatorRegistration,
    L1ValidatorWeight,
    ValidationUptime,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 5] = [
        PayloadKind::SubnetToL1Conversion,
        PayloadKind::RegisterL1Validator,
        PayloadKind::L1ValidatorRegistration,
        PayloadKind::L1ValidatorWeight,
        PayloadKind::ValidationUptime,
    ];

    pub const fn type_id(self) -> u32 {
        match self {
            Self::SubnetToL1Conversion => SUBNET_TO_L1_CONVERSION_TYPE_ID,
            Self::RegisterL1Validator => REGISTER_L1_VALIDATOR_TYPE_ID,
            Self::L1ValidatorRegistration => L1_VALIDATOR_REGISTRATION_TYPE_ID,
            Self::L1ValidatorWeight => L1_VALIDATOR_WEIGHT_TYPE_ID,
            Self::ValidationUptime => VALIDATION_UPTIME_TYPE_ID,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SubnetToL1Conversion => "SubnetToL1Conversion",
            Self::RegisterL1Validator => "RegisterL1Validator",
            Self::L1ValidatorRegistration => "L1ValidatorRegistration",
            Self::L1ValidatorWeight => "L1ValidatorWeight",
            Self::ValidationUptime => "ValidationUptime",
        }
    }

    /// Every kind that uses `type_id`. More than one entry means the caller
    /// has to say which kind it expects.
    pub fn candidates(type_id: u32) -> Vec<PayloadKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.type_id() == type_id)
            .collect()
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarpPayload {
    SubnetToL1Conversion(SubnetToL1ConversionMessage),
    RegisterL1Validator(ValidationPeriod),
    L1ValidatorRegistration(L1ValidatorRegistrationMessage),
    L1ValidatorWeight(L1ValidatorWeightMessage),
    ValidationUptime(ValidationUptimeMessage),
}

impl WarpPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::SubnetToL1Conversion(_) => PayloadKind::SubnetToL1Conversion,
            Self::RegisterL1Validator(_) => PayloadKind::RegisterL1Validator,
            Self::L1ValidatorRegistration(_) => PayloadKind::L1ValidatorRegistration,
            Self::L1ValidatorWeight(_) => PayloadKind::L1ValidatorWeight,
            Self::ValidationUptime(_) => PayloadKind::ValidationUptime,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::SubnetToL1Conversion(msg) => pack_subnet_to_l1_conversion(msg),
            Self::RegisterL1Validator(period) => pack_register_l1_validator(period),
            Self::L1ValidatorRegistration(msg) => pack_l1_validator_registration(msg),
            Self::L1ValidatorWeight(msg) => pack_l1_validator_weight(msg),
            Self::ValidationUptime(msg) => pack_validation_uptime(msg),
        }
    }

    pub fn decode(kind: PayloadKind, bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(match kind {
            PayloadKind::SubnetToL1Conversion => {
                Self::SubnetToL1Conversion(unpack_subnet_to_l1_conversion(bytes)?)
            }
            PayloadKind::RegisterL1Validator => {
                Self::RegisterL1Validator(unpack_register_l1_validator(bytes)?)
            }
            PayloadKind::L1ValidatorRegistration => {
                Self::L1ValidatorRegistration(unpack_l1_validator_registration(bytes)?)
            }
            PayloadKind::L1ValidatorWeight => {
                Self::L1ValidatorWeight(unpack_l1_validator_weight(bytes)?)
            }
            PayloadKind::ValidationUptime => {
                Self::ValidationUptime(unpack_validation_uptime(bytes)?)
            }
        })
    }
}

// ---------------------------------------------------------------------------
// RegisterL1Validator
// ---------------------------------------------------------------------------

/// Encodes the RegisterL1Validator payload. Its SHA-256 is the ValidationID.
pub fn pack_register_l1_validator(period: &ValidationPeriod) -> Vec<u8> {
    let mut out = header(PayloadKind::RegisterL1Validator);
    out.extend_from_slice(period.subnet_id.as_bytes());
    put_bytes(&mut out, period.node_id.as_bytes());
    out.extend_from_slice(period.bls_public_key.as_bytes());
    put_u64(&mut out, period.registration_expiry);
    put_owner(&mut out, &period.remaining_balance_owner);
    put_owner(&mut out, &period.disable_owner);
    put_u64(&mut out, period.weight);
    out
}

pub fn unpack_register_l1_validator(bytes: &[u8]) -> Result<ValidationPeriod, CodecError> {
    let mut reader = Reader::new(bytes);
    read_header(&mut reader, PayloadKind::RegisterL1Validator)?;
    let subnet_id = SubnetId::new(reader.read_array::<32>()?);
    let node_id = NodeId::new(reader.read_bytes()?.to_vec());
    let bls_public_key = BlsPublicKey::new(reader.read_array::<48>()?);
    let registration_expiry = reader.read_u64()?;
    let remaining_balance_owner = read_owner(&mut reader)?;
    let disable_owner = read_owner(&mut reader)?;
    let weight = reader.read_u64()?;
    reader.finish(PayloadKind::RegisterL1Validator.name())?;
    Ok(ValidationPeriod {
        subnet_id,
        node_id,
        bls_public_key,
        registration_expiry,
        remaining_balance_owner,
        disable_owner,
        weight,
    })
}

fn put_owner(out: &mut Vec<u8>, owner: &PChainOwner) {
    put_u32(out, owner.threshold);
    put_len(out, owner.addresses.len());
    for address in &owner.addresses {
        out.extend_from_slice(address.as_bytes());
    }
}

fn read_owner(reader: &mut Reader<'_>) -> Result<PChainOwner, CodecError> {
    let threshold = reader.read_u32()?;
    let count = reader.read_u32()? as usize;
    let needed = count.saturating_mul(PChainAddress::LEN);
    if needed > reader.remaining() {
        return Err(CodecError::Bounds {
            offset: reader.offset(),
            needed,
            len: reader.offset() + reader.remaining(),
        });
    }
    let mut addresses = Vec::with_capacity(count);
    for _ in 0..count {
        addresses.push(PChainAddress::new(reader.read_array::<20>()?));
    }
    Ok(PChainOwner {
        threshold,
        addresses,
    })
}

// ---------------------------------------------------------------------------
// Fixed-shape payloads
// ---------------------------------------------------------------------------

pub fn pack_subnet_to_l1_conversion(msg: &SubnetToL1ConversionMessage) -> Vec<u8> {
    let mut out = header(PayloadKind::SubnetToL1Conversion);
    out.extend_from_slice(msg.conversion_id.as_bytes());
    out
}

pub fn unpack_subnet_to_l1_conversion(
    bytes: &[u8],
) -> Result<SubnetToL1ConversionMessage, CodecError> {
    let mut reader = Reader::new(bytes);
    read_header(&mut reader, PayloadKind::SubnetToL1Conversion)?;
    let conversion_id = ConversionId::new(reader.read_array::<32>()?);
    reader.finish(PayloadKind::SubnetToL1Conversion.name())?;
    Ok(SubnetToL1ConversionMessage { conversion_id })
}

pub fn pack_l1_validator_registration(msg: &L1ValidatorRegistrationMessage) -> Vec<u8> {
    let mut out = header(PayloadKind::L1ValidatorRegistration);
    out.extend_from_slice(msg.validation_id.as_bytes());
    put_u8(&mut out, u8::from(msg.registered));
    out
}

pub fn unpack_l1_validator_registration(
    bytes: &[u8],
) -> Result<L1ValidatorRegistrationMessage, CodecError> {
    let mut reader = Reader::new(bytes);
    read_header(&mut reader, PayloadKind::L1ValidatorRegistration)?;
    let validation_id = ValidationId::new(reader.read_array::<32>()?);
    let registered = match reader.read_u8()? {
        0 => false,
        1 => true,
        other => return Err(CodecError::InvalidFlag(other)),
    };
    reader.finish(PayloadKind::L1ValidatorRegistration.name())?;
    Ok(L1ValidatorRegistrationMessage {
        validation_id,
        registered,
    })
}

pub fn pack_l1_validator_weight(msg: &L1ValidatorWeightMessage) -> Vec<u8> {
    let mut out = header(PayloadKind::L1ValidatorWeight);
    out.extend_from_slice(msg.validation_id.as_bytes());
    put_u64(&mut out, msg.nonce);
    put_u64(&mut out, msg.weight);
    out
}

pub fn unpack_l1_validator_weight(bytes: &[u8]) -> Result<L1ValidatorWeightMessage, CodecError> {
    let mut reader = Reader::new(bytes);
    read_header(&mut reader, PayloadKind::L1ValidatorWeight)?;
    let validation_id = ValidationId::new(reader.read_array::<32>()?);
    let nonce = reader.read_u64()?;
    let weight = reader.read_u64()?;
    reader.finish(PayloadKind::L1ValidatorWeight.name())?;
    Ok(L1ValidatorWeightMessage {
        validation_id,
        nonce,
        weight,
    })
}

pub fn pack_validation_uptime(msg: &ValidationUptimeMessage) -> Vec<u8> {
    let mut out = header(PayloadKind::ValidationUptime);
    out.extend_from_slice(msg.validation_id.as_bytes());
    put_u64(&mut out, msg.uptime_seconds);
    out
}

pub fn unpack_validation_uptime(bytes: &[u8]) -> Result<ValidationUptimeMessage, CodecError> {
    let mut reader = Reader::new(bytes);
    read_header(&mut reader, PayloadKind::ValidationUptime)?;
    let validation_id = ValidationId::new(reader.read_array::<32>()?);
    let uptime_seconds = reader.read_u64()?;
    reader.finish(PayloadKind::ValidationUptime.name())?;
    Ok(ValidationUptimeMessage {
        validation_id,
        uptime_seconds,
    })
}

fn header(kind: PayloadKind) -> Vec<u8> {
    let mut out = Vec::new();
    put_u16(&mut out, CODEC_VERSION);
    put_u32(&mut out, kind.type_id());
    out
}

fn read_header(reader: &mut Reader<'_>, kind: PayloadKind) -> Result<(), CodecError> {
    let version = reader.read_u16()?;
    if version != CODEC_VERSION {
        return Err(CodecError::InvalidCodecVersion(version));
    }
    let type_id = reader.read_u32()?;
    if type_id != kind.type_id() {
        return Err(CodecError::InvalidTypeId {
            kind: kind.name(),
            expected: kind.type_id(),
            actual: type_id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use l1warp_types::{
        BlsPublicKey, CodecError, ConversionId, L1ValidatorRegistrationMessage,
        L1ValidatorWeightMessage, NodeId, PChainAddress, PChainOwner, SubnetId,
        SubnetToL1ConversionMessage, ValidationId, ValidationPeriod, ValidationUptimeMessage,
    };

    use super::{
        pack_l1_validator_registration, pack_l1_validator_weight, pack_register_l1_validator,
        pack_subnet_to_l1_conversion, pack_validation_uptime, unpack_l1_validator_registration,
        unpack_register_l1_validator, PayloadKind, WarpPayload,
    };

    fn sample_period() -> ValidationPeriod {
        ValidationPeriod {
            subnet_id: SubnetId::new([0x5a; 32]),
            node_id: NodeId::new(vec![0xc0; 20]),
            bls_public_key: BlsPublicKey::new([0xb1; 48]),
            registration_expiry: 1_700_000_000,
            remaining_balance_owner: PChainOwner {
                threshold: 1,
                addresses: vec![PChainAddress::new([0x01; 20])],
            },
            disable_owner: PChainOwner {
                threshold: 2,
                addresses: vec![PChainAddress::new([0x02; 20]), PChainAddress::new([0x03; 20])],
            },
            weight: 100,
        }
    }

    #[test]
    fn register_payload_length_matches_layout() {
        let period = sample_period();
        let bytes = pack_register_l1_validator(&period);
        // 122 fixed bytes + nodeID + 20 per owner address.
        assert_eq!(bytes.len(), 122 + 20 + 3 * 20);
        assert_eq!(&bytes[..6], &[0, 0, 0, 0, 0, 1]);
        assert_eq!(unpack_register_l1_validator(&bytes).unwrap(), period);
    }

    #[test]
    fn register_round_trips_owner_shapes() {
        let mut period = sample_period();
        for (node_len, first, second) in [(0usize, 0usize, 0usize), (20, 1, 0), (32, 0, 3), (7, 4, 4)] {
            period.node_id = NodeId::new(vec![0x77; node_len]);
            period.remaining_balance_owner.addresses =
                (0..first).map(|i| PChainAddress::new([i as u8; 20])).collect();
            period.disable_owner.addresses =
                (0..second).map(|i| PChainAddress::new([0x80 | i as u8; 20])).collect();
            let bytes = pack_register_l1_validator(&period);
            assert_eq!(unpack_register_l1_validator(&bytes).unwrap(), period);
        }
    }

    #[test]
    fn register_rejects_trailing_and_truncated() {
        let bytes = pack_register_l1_validator(&sample_period());

        let mut extended = bytes.clone();
        extended.push(0);
        assert_eq!(
            unpack_register_l1_validator(&extended),
            Err(CodecError::InvalidLength {
                kind: "RegisterL1Validator",
                expected: bytes.len(),
                actual: bytes.len() + 1,
            })
        );

        for cut in [1usize, 8, 48] {
            let truncated = &bytes[..bytes.len() - cut];
            assert!(matches!(
                unpack_register_l1_validator(truncated),
                Err(CodecError::Bounds { .. })
            ));
        }
    }

    #[test]
    fn register_rejects_short_bls_key_on_the_wire() {
        // A 47-byte key shifts every later field; the buffer no longer parses.
        let period = sample_period();
        let bytes = pack_register_l1_validator(&period);
        let key_start = 6 + 32 + 4 + period.node_id.len();
        let mut short = bytes[..key_start + 47].to_vec();
        short.extend_from_slice(&bytes[key_start + 48..]);
        assert!(unpack_register_l1_validator(&short).is_err());
    }

    #[test]
    fn register_rejects_huge_address_count() {
        let mut period = sample_period();
        period.remaining_balance_owner.addresses.clear();
        period.disable_owner.addresses.clear();
        let mut bytes = pack_register_l1_validator(&period);
        // remainingBalanceOwner.addresses count lives after threshold.
        let count_at = 6 + 32 + 4 + period.node_id.len() + 48 + 8 + 4;
        bytes[count_at..count_at + 4].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(matches!(
            unpack_register_l1_validator(&bytes),
            Err(CodecError::Bounds { .. })
        ));
    }

    #[test]
    fn header_mismatches_fail_fast() {
        let mut bytes = pack_register_l1_validator(&sample_period());
        bytes[5] = 2;
        assert_eq!(
            unpack_register_l1_validator(&bytes),
            Err(CodecError::InvalidTypeId {
                kind: "RegisterL1Validator",
                expected: 1,
                actual: 2,
            })
        );
        bytes[5] = 1;
        bytes[0] = 1;
        assert_eq!(
            unpack_register_l1_validator(&bytes),
            Err(CodecError::InvalidCodecVersion(256))
        );
    }

    #[test]
    fn fixed_shape_vectors() {
        let id = ValidationId::new([0xee; 32]);
        let registration = pack_l1_validator_registration(&L1ValidatorRegistrationMessage {
            validation_id: id,
            registered: true,
        });
        assert_eq!(
            hex::encode(&registration),
            format!("000000000002{}01", "ee".repeat(32))
        );

        let weight = pack_l1_validator_weight(&L1ValidatorWeightMessage {
            validation_id: id,
            nonce: 7,
            weight: 300,
        });
        assert_eq!(
            hex::encode(&weight),
            format!(
                "000000000003{}0000000000000007000000000000012c",
                "ee".repeat(32)
            )
        );

        let uptime = pack_validation_uptime(&ValidationUptimeMessage {
            validation_id: id,
            uptime_seconds: 86_400,
        });
        assert_eq!(
            hex::encode(&uptime),
            format!("000000000000{}0000000000015180", "ee".repeat(32))
        );

        let conversion = pack_subnet_to_l1_conversion(&SubnetToL1ConversionMessage {
            conversion_id: ConversionId::new([0x0c; 32]),
        });
        assert_eq!(
            hex::encode(&conversion),
            format!("000000000000{}", "0c".repeat(32))
        );
    }

    #[test]
    fn registration_flag_must_be_boolean() {
        let mut bytes = pack_l1_validator_registration(&L1ValidatorRegistrationMessage {
            validation_id: ValidationId::default(),
            registered: false,
        });
        *bytes.last_mut().unwrap() = 2;
        assert_eq!(
            unpack_l1_validator_registration(&bytes),
            Err(CodecError::InvalidFlag(2))
        );
    }

    #[test]
    fn type_zero_is_shared_but_kinds_stay_distinct() {
        assert_eq!(
            PayloadKind::candidates(0),
            vec![PayloadKind::SubnetToL1Conversion, PayloadKind::ValidationUptime]
        );
        assert_eq!(PayloadKind::candidates(1), vec![PayloadKind::RegisterL1Validator]);
        assert!(PayloadKind::candidates(9).is_empty());

        let uptime = WarpPayload::ValidationUptime(ValidationUptimeMessage {
            validation_id: ValidationId::new([1; 32]),
            uptime_seconds: 5,
        });
        let bytes = uptime.encode();
        // Same type ID, different shape: decoding as the wrong kind is a length error.
        assert!(matches!(
            WarpPayload::decode(PayloadKind::SubnetToL1Conversion, &bytes),
            Err(CodecError::InvalidLength { .. })
        ));
        assert_eq!(
            WarpPayload::decode(PayloadKind::ValidationUptime, &bytes).unwrap(),
            uptime
        );
    }

    #[test]
    fn dispatch_round_trips_every_kind() {
        let id = ValidationId::new([9; 32]);
        let payloads = vec![
            WarpPayload::SubnetToL1Conversion(SubnetToL1ConversionMessage {
                conversion_id: ConversionId::new([4; 32]),
            }),
            WarpPayload::RegisterL1Validator(sample_period()),
            WarpPayload::L1ValidatorRegistration(L1ValidatorRegistrationMessage {
                validation_id: id,
                registered: false,
            }),
            WarpPayload::L1ValidatorWeight(L1ValidatorWeightMessage {
                validation_id: id,
                nonce: 1,
                weight: 2,
            }),
            WarpPayload::ValidationUptime(ValidationUptimeMessage {
                validation_id: id,
                uptime_seconds: 3,
            }),
        ];
        for payload in payloads {
            let decoded = WarpPayload::decode(payload.kind(), &payload.encode()).unwrap();
            assert_eq!(decoded, payload);
        }
    }
}
