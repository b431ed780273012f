//! No-op cache implementation.

use panel_core::{MetricsCache, MetricsKey, MetricsResult, Result};
use std::time::Duration;
use tracing::trace;

/// A cache that never stores anything.
///
/// `get` always returns `Ok(None)` and `put` always succeeds, so every lookup
/// recomputes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MetricsCache for NoopCache {
    fn get(&self, key: &MetricsKey) -> Result<Option<MetricsResult>> {
        trace!(%key, "NoopCache: get called, returning None");
        Ok(None)
    }

    fn put(&self, key: &MetricsKey, _result: &MetricsResult) -> Result<()> {
        trace!(%key, "NoopCache: put called, doing nothing");
        Ok(())
    }

    fn invalidate_table(&self, _table: &str) -> Result<usize> {
        Ok(0)
    }

    fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, returning 0");
        Ok(0)
    }

    fn clear(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::PeriodFilter;

    #[test]
    fn test_noop_cache_never_hits() {
        let cache = NoopCache::new();
        let key = MetricsKey::new("financial", &PeriodFilter::All, "SBN");

        cache.put(&key, &MetricsResult::default()).unwrap();
        assert!(cache.get(&key).unwrap().is_none());
        assert_eq!(cache.invalidate_table("financial").unwrap(), 0);
        assert_eq!(cache.invalidate_stale(Duration::from_secs(1)).unwrap(), 0);
        assert!(cache.clear().is_ok());
    }
}
