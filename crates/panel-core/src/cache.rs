//! Cache trait for memoizing computed metrics.
//!
//! This module defines the [`MetricsCache`] trait. Metrics are pure functions
//! of a table, a period filter and a segment key, so a cache keyed by
//! [`MetricsKey`] can serve repeated selections without recomputation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::{error::Result, types::MetricsResult, types::PeriodFilter};

/// Identifies one memoized metrics computation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricsKey {
    /// Name of the table the metrics were computed from.
    pub table: String,
    /// Period filter of the selection.
    pub period: PeriodFilter,
    /// Rendered segment key, e.g. `"Jawa/assetTrillionRp"`.
    pub segment: String,
}

impl MetricsKey {
    /// Creates a key from a table name, a period filter and any displayable
    /// segment key.
    #[must_use]
    pub fn new(table: &str, period: &PeriodFilter, segment: &(impl fmt::Display + ?Sized)) -> Self {
        Self {
            table: table.to_string(),
            period: period.clone(),
            segment: segment.to_string(),
        }
    }
}

impl fmt::Display for MetricsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.table, self.period, self.segment)
    }
}

/// Trait for memoizing computed metrics.
///
/// Implementations can keep results in memory, or discard them entirely to
/// force recomputation.
pub trait MetricsCache: Send + Sync + fmt::Debug {
    /// Retrieves cached metrics.
    ///
    /// Returns `Ok(Some(result))` if cached, `Ok(None)` if not cached.
    fn get(&self, key: &MetricsKey) -> Result<Option<MetricsResult>>;

    /// Stores metrics in the cache.
    fn put(&self, key: &MetricsKey, result: &MetricsResult) -> Result<()>;

    /// Removes every entry computed from `table`.
    ///
    /// Returns the number of entries removed.
    fn invalidate_table(&self, table: &str) -> Result<usize>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached metrics.
    fn clear(&self) -> Result<()>;
}
