//! Log-source capability consumed by the resolver, plus an in-memory source.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use l1warp_types::TxHash;
use thiserror::Error;

/// One `SendWarpMessage` event emitted by the Warp precompile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpLog {
    pub block_number: u64,
    pub transaction_hash: Option<TxHash>,
    /// The `message` argument: a serialized UnsignedMessage.
    pub message: Vec<u8>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogSourceError {
    #[error("log source transport error: {0}")]
    Transport(String),
    #[error("log source unavailable: {0}")]
    Unavailable(String),
}

/// Query capability over Warp precompile logs. Implementations own their
/// retry policy; the resolver never retries.
#[async_trait]
pub trait WarpLogSource: Send + Sync {
    async fn latest_block(&self) -> Result<u64, LogSourceError>;

    /// `SendWarpMessage` logs in the inclusive range `[from_block, to_block]`,
    /// oldest first.
    async fn warp_logs(&self, from_block: u64, to_block: u64)
        -> Result<Vec<WarpLog>, LogSourceError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    logs: Vec<WarpLog>,
    queries: Vec<(u64, u64)>,
    failure: Option<LogSourceError>,
}

/// In-memory log source with a fixed head block. Records every range it is
/// asked for so callers can assert on the scan order.
#[derive(Debug, Clone)]
pub struct MemoryLogSource {
    head: u64,
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryLogSource {
    pub fn new(head: u64) -> Self {
        Self {
            head,
            inner: Arc::new(Mutex::new(MemoryInner::default())),
        }
    }

    pub fn with_logs(head: u64, logs: Vec<WarpLog>) -> Self {
        let source = Self::new(head);
        for log in logs {
            source.push(log);
        }
        source
    }

    pub fn push(&self, log: WarpLog) {
        let mut inner = self.lock();
        inner.logs.push(log);
        inner.logs.sort_by_key(|log| log.block_number);
    }

    /// Makes every subsequent `warp_logs` call fail with `error`.
    pub fn fail_with(&self, error: LogSourceError) {
        self.lock().failure = Some(error);
    }

    /// Ranges queried so far, in call order.
    pub fn queries(&self) -> Vec<(u64, u64)> {
        self.lock().queries.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl WarpLogSource for MemoryLogSource {
    async fn latest_block(&self) -> Result<u64, LogSourceError> {
        Ok(self.head)
    }

    async fn warp_logs(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<WarpLog>, LogSourceError> {
        let mut inner = self.lock();
        inner.queries.push((from_block, to_block));
        if let Some(error) = &inner.failure {
            return Err(error.clone());
        }
        Ok(inner
            .logs
            .iter()
            .filter(|log| (from_block..=to_block).contains(&log.block_number))
            .cloned()
            .collect())
    }
}
