//! ValidationID derivation.
//!
//! A validator registered through a RegisterL1Validator message is
//! identified by `sha256(payload)`. Validators present at conversion time
//! (bootstrap validators) have no such message; their ID is
//! `sha256(subnetID || be32(index))`.

use l1warp_types::{ValidationId, ValidationPeriod};
use sha2::{Digest, Sha256};

use crate::payload::pack_register_l1_validator;

pub fn calculate_validation_id(period: &ValidationPeriod) -> ValidationId {
    validation_id_of_payload(&pack_register_l1_validator(period))
}

/// Hash of an already-encoded RegisterL1Validator payload.
pub fn validation_id_of_payload(payload: &[u8]) -> ValidationId {
    ValidationId::new(sha256_32(payload))
}

/// `subnetID || be32(index)`.
pub fn bootstrap_derivation(subnet_id: &[u8], index: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(subnet_id.len() + 4);
    out.extend_from_slice(subnet_id);
    out.extend_from_slice(&index.to_be_bytes());
    out
}

pub fn bootstrap_validation_id(subnet_id: &[u8], index: u32) -> ValidationId {
    ValidationId::new(sha256_32(&bootstrap_derivation(subnet_id, index)))
}

pub(crate) fn sha256_32(input: &[u8]) -> [u8; 32] {
    let digest: [u8; 32] = Sha256::digest(input).into();
    digest
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use l1warp_types::{BlsPublicKey, NodeId, PChainAddress, PChainOwner, SubnetId, ValidationPeriod};

    use super::{bootstrap_derivation, bootstrap_validation_id, calculate_validation_id};

    fn period() -> ValidationPeriod {
        ValidationPeriod {
            subnet_id: SubnetId::new([0x11; 32]),
            node_id: NodeId::new(vec![0x22; 20]),
            bls_public_key: BlsPublicKey::new([0x33; 48]),
            registration_expiry: 1_000,
            remaining_balance_owner: PChainOwner {
                threshold: 1,
                addresses: vec![PChainAddress::new([0x44; 20])],
            },
            disable_owner: PChainOwner {
                threshold: 1,
                addresses: vec![PChainAddress::new([0x55; 20])],
            },
            weight: 5,
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(calculate_validation_id(&period()), calculate_validation_id(&period()));
    }

    #[test]
    fn every_field_changes_the_id() {
        let base = calculate_validation_id(&period());
        let mutations: Vec<Box<dyn Fn(&mut ValidationPeriod)>> = vec![
            Box::new(|p| p.subnet_id = SubnetId::new([0x12; 32])),
            Box::new(|p| p.node_id = NodeId::new(vec![0x22; 19])),
            Box::new(|p| p.bls_public_key = BlsPublicKey::new([0x34; 48])),
            Box::new(|p| p.registration_expiry += 1),
            Box::new(|p| p.remaining_balance_owner.threshold = 2),
            Box::new(|p| p.remaining_balance_owner.addresses.push(PChainAddress::new([0; 20]))),
            Box::new(|p| p.disable_owner.threshold = 0),
            Box::new(|p| p.disable_owner.addresses.clear()),
            Box::new(|p| p.weight = 6),
        ];
        for mutate in mutations {
            let mut changed = period();
            mutate(&mut changed);
            assert_ne!(calculate_validation_id(&changed), base);
        }
    }

    #[test]
    fn owner_address_order_matters() {
        let mut a = period();
        a.disable_owner.addresses = vec![PChainAddress::new([1; 20]), PChainAddress::new([2; 20])];
        let mut b = a.clone();
        b.disable_owner.addresses.reverse();
        assert_ne!(calculate_validation_id(&a), calculate_validation_id(&b));
    }

    #[test]
    fn bootstrap_ids_are_distinct() {
        let subnet = [0xab; 32];
        assert_eq!(bootstrap_derivation(&subnet, 1).len(), 36);
        assert_eq!(&bootstrap_derivation(&subnet, 258)[32..], &[0, 0, 1, 2]);
        let ids: HashSet<_> = (0..10).map(|i| bootstrap_validation_id(&subnet, i)).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn bootstrap_vector() {
        assert_eq!(
            hex::encode(bootstrap_validation_id(&[0u8; 32], 0).as_bytes()),
            "6db65fd59fd356f6729140571b5bcd6bb3b83492a16e1bf0a3884442fc3c8a0e"
        );
    }
}
