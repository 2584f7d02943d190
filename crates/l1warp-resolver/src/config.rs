use crate::resolver::ResolveError;

/// Tuning for [`crate::JustificationResolver`].
///
/// A `bootstrap_search_bound` below the number of validators present at
/// conversion time makes the tail of that set fall through to the log scan.
/// A bound of 0 skips bootstrap derivation entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub bootstrap_search_bound: u32,
    /// Blocks per `eth_getLogs` query.
    pub batch_size: u64,
    /// Registration payloads kept in memory. 0 disables the cache.
    pub cache_capacity: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bootstrap_search_bound: 100,
            batch_size: 2_048,
            cache_capacity: 256,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.batch_size == 0 {
            return Err(ResolveError::InvalidConfig("batch_size must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ResolverConfig;
    use crate::resolver::ResolveError;

    #[test]
    fn defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.bootstrap_search_bound, 100);
        assert_eq!(config.batch_size, 2_048);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_batch_rejected() {
        let config = ResolverConfig {
            batch_size: 0,
            ..ResolverConfig::default()
        };
        assert!(matches!(config.validate(), Err(ResolveError::InvalidConfig(_))));
    }
}
