//! In-memory cache implementation.

use chrono::{DateTime, TimeDelta, Utc};
use panel_core::{MetricsCache, MetricsKey, MetricsResult, PanelError, Result};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX)
    }
}

type Entries = HashMap<MetricsKey, CacheEntry<MetricsResult>>;

/// Metrics cache kept in process memory.
///
/// Entries live in a `RwLock`-protected `HashMap` and are lost when the cache
/// is dropped. Results are cloned on get and put.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<Entries>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached entries.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Cache`] if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Returns true if nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Cache`] if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Entries>> {
        self.entries
            .read()
            .map_err(|e| PanelError::Cache(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Entries>> {
        self.entries
            .write()
            .map_err(|e| PanelError::Cache(e.to_string()))
    }
}

impl MetricsCache for InMemoryCache {
    #[instrument(skip(self), fields(key = %key))]
    fn get(&self, key: &MetricsKey) -> Result<Option<MetricsResult>> {
        let cache = self.read()?;
        match cache.get(key) {
            Some(entry) => {
                debug!("Cache hit for metrics");
                Ok(Some(entry.data.clone()))
            }
            None => {
                debug!("Cache miss for metrics");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, result), fields(key = %key))]
    fn put(&self, key: &MetricsKey, result: &MetricsResult) -> Result<()> {
        self.write()?
            .insert(key.clone(), CacheEntry::new(result.clone()));
        debug!("Cached metrics");
        Ok(())
    }

    #[instrument(skip(self))]
    fn invalidate_table(&self, table: &str) -> Result<usize> {
        let mut cache = self.write()?;
        let before = cache.len();
        cache.retain(|key, _| key.table != table);
        let removed = before - cache.len();
        debug!("Invalidated {} entries for table", removed);
        Ok(removed)
    }

    #[instrument(skip(self))]
    fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.write()?;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();

        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    fn clear(&self) -> Result<()> {
        self.write()?.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{Month, PeriodFilter};
    use std::sync::Arc;
    use std::thread;

    fn sample() -> MetricsResult {
        MetricsResult {
            latest: 150.0,
            initial: 100.0,
            total: 1500.0,
            growth: 50.0,
            trend: vec![0.0, 50.0],
            highest: 150.0,
            highest_month: Some(Month::Dec),
            ..Default::default()
        }
    }

    #[test]
    fn test_memory_cache_get_put() {
        let cache = InMemoryCache::new();
        let key = MetricsKey::new("financial", &PeriodFilter::from("2024"), "Pasar Modal");

        // Initially no data
        assert!(cache.get(&key).unwrap().is_none());

        cache.put(&key, &sample()).unwrap();
        assert_eq!(cache.get(&key).unwrap(), Some(sample()));

        // The period is part of the key.
        let other = MetricsKey::new("financial", &PeriodFilter::All, "Pasar Modal");
        assert!(cache.get(&other).unwrap().is_none());
    }

    #[test]
    fn test_memory_cache_invalidate_table() {
        let cache = InMemoryCache::new();
        cache
            .put(&MetricsKey::new("financial", &PeriodFilter::All, "SBN"), &sample())
            .unwrap();
        cache
            .put(&MetricsKey::new("investors", &PeriodFilter::All, "Jawa/assetTrillionRp"), &sample())
            .unwrap();

        assert_eq!(cache.invalidate_table("financial").unwrap(), 1);
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_memory_cache_invalidate_stale() {
        let cache = InMemoryCache::new();
        let key = MetricsKey::new("financial", &PeriodFilter::All, "SBN");
        cache.put(&key, &sample()).unwrap();

        // Nothing is older than an hour.
        assert_eq!(cache.invalidate_stale(Duration::from_secs(3600)).unwrap(), 0);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.invalidate_stale(Duration::ZERO).unwrap(), 1);
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn test_memory_cache_clear() {
        let cache = InMemoryCache::new();
        let key = MetricsKey::new("demographics", &PeriodFilter::All, "age/31-40");
        cache.put(&key, &sample()).unwrap();

        cache.clear().unwrap();
        assert!(cache.get(&key).unwrap().is_none());
    }

    #[test]
    fn test_memory_cache_shared_across_threads() {
        let cache = Arc::new(InMemoryCache::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let key = MetricsKey::new("financial", &PeriodFilter::All, &i);
                    cache.put(&key, &sample()).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len().unwrap(), 4);
    }
}
