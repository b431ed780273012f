//! Panel configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    calendar::Month,
    error::{PanelError, Result},
    types::{Period, PeriodFilter},
};

/// Default TTL for memoized metrics, in seconds.
const DEFAULT_CACHE_TTL_SECS: u64 = 15 * 60;

/// Settings shared by the dashboard and its computations.
///
/// Every field has a default, so a JSON document only needs the fields it
/// overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    /// Ordered sub-periods every aggregation iterates.
    pub months: Vec<Month>,
    /// Period selected when a dashboard is created.
    pub default_period: PeriodFilter,
    /// Periods shown in year-over-year comparisons. Empty means every period
    /// present in the data, sorted.
    pub comparison_periods: Vec<Period>,
    /// Age after which memoized metrics are considered stale, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            months: Month::ALL.to_vec(),
            default_period: PeriodFilter::All,
            comparison_periods: Vec::new(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl PanelConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    /// Returns [`PanelError::Parse`] for malformed JSON and
    /// [`PanelError::InvalidParameter`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the period selected on creation.
    #[must_use]
    pub fn with_default_period(mut self, period: impl Into<PeriodFilter>) -> Self {
        self.default_period = period.into();
        self
    }

    /// Set the periods used for year-over-year comparisons.
    #[must_use]
    pub fn with_comparison_periods(mut self, periods: impl IntoIterator<Item = Period>) -> Self {
        self.comparison_periods = periods.into_iter().collect();
        self
    }

    /// Set the TTL for memoized metrics.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = ttl.as_secs();
        self
    }

    /// TTL for memoized metrics.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Check that the month list is non-empty, strictly ordered and free of
    /// duplicates.
    ///
    /// # Errors
    /// Returns [`PanelError::InvalidParameter`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.months.is_empty() {
            return Err(PanelError::InvalidParameter(
                "months must not be empty".to_string(),
            ));
        }
        if self.months.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PanelError::InvalidParameter(
                "months must be in calendar order without duplicates".to_string(),
            ));
        }
        Ok(())
    }
}
