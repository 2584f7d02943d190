//! JSON-RPC log source backed by an alloy provider.

use alloy_primitives::{address, Address};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::Filter;
use alloy_sol_types::{sol, SolEvent};
use async_trait::async_trait;
use l1warp_types::TxHash;
use tracing::{info, warn};

use crate::source::{LogSourceError, WarpLog, WarpLogSource};

sol! {
    event SendWarpMessage(
        address indexed sourceAddress,
        bytes32 indexed unsignedMessageID,
        bytes message
    );
}

/// Warp precompile. Identical on every chain this tool targets.
pub const WARP_PRECOMPILE_ADDRESS: Address = address!("0200000000000000000000000000000000000005");

pub struct RpcLogSource<P> {
    provider: P,
}

impl<P: Provider> RpcLogSource<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl RpcLogSource<DynProvider> {
    /// Connects to an HTTP or WebSocket endpoint.
    pub async fn connect(url: &str) -> Result<Self, LogSourceError> {
        info!(url, "connecting to EVM node");
        let provider = ProviderBuilder::new()
            .connect(url)
            .await
            .map_err(|e| LogSourceError::Unavailable(e.to_string()))?;
        Ok(Self::new(provider.erased()))
    }
}

#[async_trait]
impl<P: Provider> WarpLogSource for RpcLogSource<P> {
    async fn latest_block(&self) -> Result<u64, LogSourceError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| LogSourceError::Transport(e.to_string()))
    }

    async fn warp_logs(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<WarpLog>, LogSourceError> {
        let logs = self
            .provider
            .get_logs(&warp_filter(from_block, to_block))
            .await
            .map_err(|e| LogSourceError::Transport(e.to_string()))?;

        let mut out = Vec::with_capacity(logs.len());
        for log in logs {
            let tx = log.transaction_hash;
            let Some(block_number) = log.block_number else {
                warn!(tx = ?tx, "skipping warp log without block number");
                continue;
            };
            match log.log_decode::<SendWarpMessage>() {
                Ok(decoded) => out.push(WarpLog {
                    block_number,
                    transaction_hash: tx.map(|hash| TxHash::new(hash.0)),
                    message: decoded.inner.data.message.to_vec(),
                }),
                Err(e) => {
                    warn!(block_number, tx = ?tx, error = %e, "skipping undecodable warp log");
                }
            }
        }
        Ok(out)
    }
}

/// `SendWarpMessage` events from the precompile in `[from_block, to_block]`.
fn warp_filter(from_block: u64, to_block: u64) -> Filter {
    Filter::new()
        .address(WARP_PRECOMPILE_ADDRESS)
        .event_signature(SendWarpMessage::SIGNATURE_HASH)
        .from_block(from_block)
        .to_block(to_block)
}
