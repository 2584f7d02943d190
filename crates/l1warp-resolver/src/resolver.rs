//! Registration justification lookup.
//!
//! Two phases, cheapest first:
//! 1. Bootstrap derivation: hash `subnetID || be32(index)` for each index below
//!    the configured bound and compare against the target.
//! 2. Log scan: walk the chain backward from the head in fixed-size batches,
//!    newest log first, looking for the RegisterL1Validator payload whose
//!    SHA-256 is the target.
//!
//! Batches are queried strictly one after another. Dropping the returned
//! future cancels the scan between queries.

use std::sync::{Mutex, MutexGuard, PoisonError};

use l1warp_codec::{
    addressed_call_type_id, bootstrap_validation_id, decode_addressed_call_payload,
    decode_unsigned_message, unpack_register_l1_validator, validation_id_of_payload,
    RegistrationJustification, ADDRESSED_CALL_TYPE_ID,
};
use l1warp_types::{NodeId, SubnetId, ValidationId, ValidationPeriod};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::RegistrationCache;
use crate::config::ResolverConfig;
use crate::source::{LogSourceError, WarpLog, WarpLogSource};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    LogSource(#[from] LogSourceError),
    #[error("invalid resolver config: {0}")]
    InvalidConfig(&'static str),
}

/// Identifies the validator whose registration is being justified.
#[derive(Debug, Clone)]
pub struct JustificationQuery {
    pub validation_id: ValidationId,
    pub subnet_id: SubnetId,
    /// Cross-checked against a matching registration. Mismatch only warns.
    pub node_id: Option<NodeId>,
}

pub struct JustificationResolver<S> {
    source: S,
    config: ResolverConfig,
    cache: Mutex<RegistrationCache>,
}

impl<S: WarpLogSource> JustificationResolver<S> {
    pub fn new(source: S, config: ResolverConfig) -> Result<Self, ResolveError> {
        config.validate()?;
        let cache = Mutex::new(RegistrationCache::new(config.cache_capacity));
        Ok(Self {
            source,
            config,
            cache,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// `Ok(None)` when neither phase finds the target.
    pub async fn resolve(
        &self,
        query: &JustificationQuery,
    ) -> Result<Option<RegistrationJustification>, ResolveError> {
        if let Some(index) = self.find_bootstrap_index(&query.subnet_id, &query.validation_id) {
            info!(
                validation_id = %query.validation_id,
                subnet_id = %query.subnet_id,
                index,
                "matched bootstrap validator"
            );
            return Ok(Some(RegistrationJustification::bootstrap(
                &query.subnet_id,
                index,
            )));
        }

        if let Some(payload) = self.cached(&query.validation_id) {
            debug!(validation_id = %query.validation_id, "registration cache hit");
            return Ok(Some(RegistrationJustification::original(payload)));
        }

        info!(
            validation_id = %query.validation_id,
            bound = self.config.bootstrap_search_bound,
            "not a bootstrap validator, scanning warp logs"
        );

        let Some(payload) = self.scan_logs(query).await? else {
            info!(validation_id = %query.validation_id, "no registration found");
            return Ok(None);
        };

        self.lock_cache().insert(query.validation_id, payload.clone());
        Ok(Some(RegistrationJustification::original(payload)))
    }

    /// Marshaled justification bytes, ready for a signature aggregator.
    pub async fn resolve_bytes(
        &self,
        query: &JustificationQuery,
    ) -> Result<Option<Vec<u8>>, ResolveError> {
        Ok(self
            .resolve(query)
            .await?
            .map(|justification| justification.encode()))
    }

    fn find_bootstrap_index(&self, subnet_id: &SubnetId, target: &ValidationId) -> Option<u32> {
        (0..self.config.bootstrap_search_bound)
            .find(|index| bootstrap_validation_id(subnet_id.as_bytes(), *index) == *target)
    }

    async fn scan_logs(&self, query: &JustificationQuery) -> Result<Option<Vec<u8>>, ResolveError> {
        let head = self.source.latest_block().await?;
        let span = self.config.batch_size - 1;
        let mut to_block = head;

        info!(head, batch_size = self.config.batch_size, "starting backward log scan");

        loop {
            let from_block = to_block.saturating_sub(span);
            let logs = self.source.warp_logs(from_block, to_block).await?;
            debug!(from_block, to_block, logs = logs.len(), "scanned batch");

            for log in logs.iter().rev() {
                let Some((payload, period)) = registration_in(log) else {
                    continue;
                };
                if validation_id_of_payload(&payload) != query.validation_id {
                    continue;
                }

                check_node_id(query, &period, log);
                info!(
                    validation_id = %query.validation_id,
                    block = log.block_number,
                    tx = ?log.transaction_hash,
                    "found registration message"
                );
                return Ok(Some(payload));
            }

            if from_block == 0 {
                return Ok(None);
            }
            to_block = from_block - 1;
        }
    }

    fn cached(&self, id: &ValidationId) -> Option<Vec<u8>> {
        self.lock_cache().get(id).map(<[u8]>::to_vec)
    }

    fn lock_cache(&self) -> MutexGuard<'_, RegistrationCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The RegisterL1Validator payload carried by a log, if it has one.
fn registration_in(log: &WarpLog) -> Option<(Vec<u8>, ValidationPeriod)> {
    let addressed_call = decode_unsigned_message(&log.message)?;
    if addressed_call_type_id(addressed_call)? != ADDRESSED_CALL_TYPE_ID {
        return None;
    }
    let payload = decode_addressed_call_payload(addressed_call)?;
    match unpack_register_l1_validator(payload) {
        Ok(period) => Some((payload.to_vec(), period)),
        Err(e) => {
            debug!(block = log.block_number, error = %e, "skipping non-registration payload");
            None
        }
    }
}

fn check_node_id(query: &JustificationQuery, period: &ValidationPeriod, log: &WarpLog) {
    if let Some(expected) = &query.node_id {
        if *expected != period.node_id {
            warn!(
                validation_id = %query.validation_id,
                expected = %expected,
                found = %period.node_id,
                block = log.block_number,
                "registration NodeID differs from the requested NodeID"
            );
        }
    }
}
