//! Subnet-to-L1 conversion data and its conversion ID.

use l1warp_types::{ConversionId, SubnetToL1ConversionData};

use crate::message::CODEC_VERSION;
use crate::validation_id::sha256_32;
use crate::wire::{put_bytes, put_len, put_u16, put_u64};

/// `codec || subnetID || managerChainID || bytes(managerAddress) || u32(n) ||
/// n * (bytes(nodeID) || blsPublicKey || u64(weight))`
pub fn marshal_conversion_data(data: &SubnetToL1ConversionData) -> Vec<u8> {
    let mut out = Vec::new();
    put_u16(&mut out, CODEC_VERSION);
    out.extend_from_slice(data.subnet_id.as_bytes());
    out.extend_from_slice(data.manager_chain_id.as_bytes());
    put_bytes(&mut out, &data.manager_address);
    put_len(&mut out, data.validators.len());
    for validator in &data.validators {
        put_bytes(&mut out, validator.node_id.as_bytes());
        out.extend_from_slice(validator.bls_public_key.as_bytes());
        put_u64(&mut out, validator.weight);
    }
    out
}

pub fn conversion_id(data: &SubnetToL1ConversionData) -> ConversionId {
    ConversionId::new(sha256_32(&marshal_conversion_data(data)))
}

#[cfg(test)]
mod tests {
    use l1warp_types::{
        BlockchainId, BlsPublicKey, ConversionValidator, NodeId, SubnetId,
        SubnetToL1ConversionData,
    };

    use super::{conversion_id, marshal_conversion_data};

    fn data() -> SubnetToL1ConversionData {
        SubnetToL1ConversionData {
            subnet_id: SubnetId::new([0x01; 32]),
            manager_chain_id: BlockchainId::new([0x02; 32]),
            manager_address: vec![0x03; 20],
            validators: vec![ConversionValidator {
                node_id: NodeId::new(vec![0x04; 20]),
                bls_public_key: BlsPublicKey::new([0x05; 48]),
                weight: 100,
            }],
        }
    }

    #[test]
    fn layout() {
        let bytes = marshal_conversion_data(&data());
        // 2 + 32 + 32 + (4 + 20) + 4 + (4 + 20) + 48 + 8
        assert_eq!(bytes.len(), 174);
        assert_eq!(&bytes[..2], &[0, 0]);
        assert_eq!(&bytes[66..70], &[0, 0, 0, 20]);
        assert_eq!(&bytes[90..94], &[0, 0, 0, 1]);
        assert_eq!(&bytes[166..], &100u64.to_be_bytes());
    }

    #[test]
    fn id_tracks_validator_set() {
        let base = conversion_id(&data());
        let mut more = data();
        more.validators.push(more.validators[0].clone());
        assert_ne!(conversion_id(&more), base);
        assert_eq!(conversion_id(&data()), base);
    }
}
