//! Dashboard state and cache-first metrics over the three panel tables.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use panel_core::{
    DemographicKey, Dimension, MetricsCache, MetricsKey, MetricsResult, Month, PanelConfig,
    Period, PeriodFilter, Quarter, RegionKey, RegionMeasure, Result, SegmentId, SeriesRecord,
};
use panel_fixtures::{DEMOGRAPHICS_TABLE, Dataset, FINANCIAL_TABLE, INVESTORS_TABLE};
use panel_reshape::{
    SegmentPoint, SegmentTable, growth_table, monthly_table, quarterly_table, segment_totals,
    yearly_table,
};
use panel_stats::{Aggregation, SegmentComparison, SegmentSummary, compare_segment, compute_metrics};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::selection::{View, ViewSelections};

/// One of the three dashboard tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    /// Monthly values per category.
    Financial,
    /// Regional investor figures.
    Investors,
    /// Demographic asset figures.
    Demographics,
}

impl Table {
    /// Every table.
    pub const ALL: [Self; 3] = [Self::Financial, Self::Investors, Self::Demographics];

    /// Table name used in cache keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Financial => FINANCIAL_TABLE,
            Self::Investors => INVESTORS_TABLE,
            Self::Demographics => DEMOGRAPHICS_TABLE,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `$body` against the records of `$table` with `$keys` built from the
/// given segments, using the dashboard's current region measure and
/// demographic dimension.
macro_rules! with_table {
    ($dashboard:expr, $table:expr, $segments:expr, |$records:ident, $keys:ident| $body:expr) => {{
        let dashboard: &Dashboard = $dashboard;
        let segments: &[SegmentId] = $segments;
        match $table {
            Table::Financial => {
                let $records = dashboard.dataset.financial.as_slice();
                let $keys: Vec<(SegmentId, SegmentId)> =
                    segments.iter().map(|s| (s.clone(), s.clone())).collect();
                $body
            }
            Table::Investors => {
                let $records = dashboard.dataset.investors.as_slice();
                let $keys: Vec<(SegmentId, RegionKey)> = segments
                    .iter()
                    .map(|s| (s.clone(), RegionKey::new(s.clone(), dashboard.measure)))
                    .collect();
                $body
            }
            Table::Demographics => {
                let $records = dashboard.dataset.demographics.as_slice();
                let $keys: Vec<(SegmentId, DemographicKey)> = segments
                    .iter()
                    .map(|s| (s.clone(), DemographicKey::new(dashboard.dimension, s.clone())))
                    .collect();
                $body
            }
        }
    }};
}

/// Investor dashboard over a [`Dataset`].
///
/// Holds the period filter, the region measure and demographic dimension in
/// use, and one [`ViewSelections`] per table. Per-segment metrics are served
/// from the configured [`MetricsCache`] when possible; cache failures are
/// logged and never fail a lookup.
///
/// # Example
///
/// ```
/// use panel::{Dashboard, Table, View};
///
/// # fn example() -> panel::Result<()> {
/// let mut dashboard = Dashboard::bundled()?;
/// dashboard.set_period("2024");
/// let summary = dashboard.summary(Table::Financial, View::Overview);
/// println!("total {:.2}, top {:?}", summary.total, summary.top_segment);
/// # Ok(())
/// # }
/// ```
pub struct Dashboard {
    dataset: Dataset,
    config: PanelConfig,
    cache: Option<Arc<dyn MetricsCache>>,
    period: PeriodFilter,
    measure: RegionMeasure,
    dimension: Dimension,
    financial: ViewSelections,
    investors: ViewSelections,
    demographics: ViewSelections,
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("financial_rows", &self.dataset.financial.len())
            .field("investor_rows", &self.dataset.investors.len())
            .field("demographic_rows", &self.dataset.demographics.len())
            .field("period", &self.period)
            .field("measure", &self.measure)
            .field("dimension", &self.dimension)
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .finish()
    }
}

impl Dashboard {
    /// Creates a dashboard with the default configuration and every segment
    /// selected.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let config = PanelConfig::default();
        let dimension = Dimension::default();
        Self {
            financial: ViewSelections::new(first_seen(dataset.financial.iter().map(|r| &r.category))),
            investors: ViewSelections::new(first_seen(dataset.investors.iter().map(|r| &r.region))),
            demographics: ViewSelections::new(canonical(dimension)),
            period: config.default_period.clone(),
            measure: RegionMeasure::default(),
            dimension,
            cache: None,
            config,
            dataset,
        }
    }

    /// Creates a dashboard over the bundled fixtures.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixtures fail to parse.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(Dataset::bundled()?))
    }

    /// Replaces the configuration and resets the period to its default.
    #[must_use]
    pub fn with_config(mut self, config: PanelConfig) -> Self {
        self.period = config.default_period.clone();
        self.config = config;
        self
    }

    /// Set the metrics cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn MetricsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Returns the current period filter.
    #[must_use]
    pub const fn period(&self) -> &PeriodFilter {
        &self.period
    }

    /// Selects a period, or every period with `"All"`.
    ///
    /// Cached metrics are keyed by period and stay valid.
    pub fn set_period(&mut self, period: impl Into<PeriodFilter>) {
        let period = period.into();
        debug!(from = %self.period, to = %period, "Changing period");
        self.period = period;
    }

    /// Returns the region measure in use.
    #[must_use]
    pub const fn measure(&self) -> RegionMeasure {
        self.measure
    }

    /// Switches the region measure.
    pub fn set_measure(&mut self, measure: RegionMeasure) {
        debug!(measure = measure.label(), "Changing region measure");
        self.measure = measure;
    }

    /// Returns the demographic dimension in use.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Switches the demographic dimension and re-selects all of its
    /// subcategories in every view.
    pub fn set_dimension(&mut self, dimension: Dimension) {
        if dimension == self.dimension {
            return;
        }
        debug!(%dimension, "Changing demographic dimension");
        self.dimension = dimension;
        self.demographics.reset(canonical(dimension));
    }

    /// Returns every period present in the dataset, sorted.
    #[must_use]
    pub fn periods(&self) -> Vec<Period> {
        self.dataset.periods()
    }

    /// Periods compared year over year: the configured list, or every period
    /// in the dataset.
    #[must_use]
    pub fn comparison_periods(&self) -> Vec<Period> {
        if self.config.comparison_periods.is_empty() {
            self.periods()
        } else {
            self.config.comparison_periods.clone()
        }
    }

    /// Returns the categories of the financial table in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &[SegmentId] {
        self.financial.available()
    }

    /// Returns the regions of the investor table in first-seen order.
    #[must_use]
    pub fn regions(&self) -> &[SegmentId] {
        self.investors.available()
    }

    /// Returns the canonical subcategories of `dimension`.
    #[must_use]
    pub fn subcategories(dimension: Dimension) -> Vec<SegmentId> {
        canonical(dimension)
    }

    /// Returns the selections of `table`.
    #[must_use]
    pub const fn selections(&self, table: Table) -> &ViewSelections {
        match table {
            Table::Financial => &self.financial,
            Table::Investors => &self.investors,
            Table::Demographics => &self.demographics,
        }
    }

    /// Returns the selections of `table` for modification.
    pub fn selections_mut(&mut self, table: Table) -> &mut ViewSelections {
        match table {
            Table::Financial => &mut self.financial,
            Table::Investors => &mut self.investors,
            Table::Demographics => &mut self.demographics,
        }
    }

    /// Metrics of one category under the current period.
    pub fn category_metrics(&self, category: &SegmentId) -> MetricsResult {
        self.cached_metrics(Table::Financial, self.dataset.financial.as_slice(), category)
    }

    /// Metrics of one region and measure under the current period.
    pub fn region_metrics(&self, key: &RegionKey) -> MetricsResult {
        self.cached_metrics(Table::Investors, self.dataset.investors.as_slice(), key)
    }

    /// Metrics of one demographic subcategory under the current period.
    pub fn demographic_metrics(&self, key: &DemographicKey) -> MetricsResult {
        self.cached_metrics(Table::Demographics, self.dataset.demographics.as_slice(), key)
    }

    /// Metrics of one segment of `table`, reading the current measure or
    /// dimension where the table needs one.
    pub fn segment_metrics(&self, table: Table, segment: &SegmentId) -> MetricsResult {
        match table {
            Table::Financial => self.category_metrics(segment),
            Table::Investors => self.region_metrics(&RegionKey::new(segment.clone(), self.measure)),
            Table::Demographics => {
                self.demographic_metrics(&DemographicKey::new(self.dimension, segment.clone()))
            }
        }
    }

    /// Metrics of every segment selected in `view`, in selection order.
    pub fn view_metrics(&self, table: Table, view: View) -> Vec<(SegmentId, MetricsResult)> {
        self.selections(table)
            .selected(view)
            .iter()
            .map(|segment| (segment.clone(), self.segment_metrics(table, segment)))
            .collect()
    }

    /// Cross-segment summary of the segments selected in `view`.
    #[instrument(skip(self), fields(period = %self.period))]
    pub fn summary(&self, table: Table, view: View) -> SegmentSummary {
        let metrics = self.view_metrics(table, view);
        SegmentSummary::from_results(metrics.iter().map(|(s, m)| (s, m)))
    }

    /// Selection total of each segment selected in `view`.
    pub fn totals(&self, table: Table, view: View) -> Vec<SegmentPoint> {
        let months = &self.config.months;
        with_table!(self, table, self.selections(table).selected(view), |records, keys| {
            segment_totals(records, &self.period, &keys, months)
        })
    }

    /// Month-major table of the segments selected in `view`.
    pub fn monthly(&self, table: Table, view: View, aggregation: Aggregation) -> SegmentTable<Month> {
        let months = &self.config.months;
        with_table!(self, table, self.selections(table).selected(view), |records, keys| {
            monthly_table(records, &self.period, &keys, months, aggregation)
        })
    }

    /// Month-over-month growth of the segments selected in `view`.
    pub fn growth(&self, table: Table, view: View) -> SegmentTable<Month> {
        let months = &self.config.months;
        with_table!(self, table, self.selections(table).selected(view), |records, keys| {
            growth_table(records, &self.period, &keys, months)
        })
    }

    /// Quarterly averages of the segments selected in `view`.
    pub fn quarterly(&self, table: Table, view: View) -> SegmentTable<Quarter> {
        with_table!(self, table, self.selections(table).selected(view), |records, keys| {
            quarterly_table(records, &self.period, &keys)
        })
    }

    /// Per-period sums of the segments selected in `view`, one row per
    /// [`comparison_periods`](Self::comparison_periods) entry.
    ///
    /// The rows do not depend on the current period filter.
    pub fn yearly(&self, table: Table, view: View) -> SegmentTable<Period> {
        let months = &self.config.months;
        let periods = self.comparison_periods();
        with_table!(self, table, self.selections(table).selected(view), |records, keys| {
            yearly_table(records, &periods, &keys, months)
        })
    }

    /// Comparison rows of the segments selected in `view`.
    pub fn comparison(&self, table: Table, view: View) -> Vec<SegmentComparison> {
        let months = &self.config.months;
        let periods = self.comparison_periods();
        with_table!(self, table, self.selections(table).selected(view), |records, keys| {
            keys.iter()
                .map(|(segment, key)| {
                    compare_segment(records, &self.period, &periods, segment.clone(), key, months)
                })
                .collect()
        })
    }

    /// Drops cached metrics older than the configured TTL.
    ///
    /// Returns the number of entries removed, 0 without a cache.
    ///
    /// # Errors
    ///
    /// Returns the cache's error if eviction fails.
    pub fn evict_stale(&self) -> Result<usize> {
        match &self.cache {
            Some(cache) => cache.invalidate_stale(self.config.cache_ttl()),
            None => Ok(0),
        }
    }

    #[instrument(level = "trace", skip(self, records, key), fields(period = %self.period, key = %key))]
    fn cached_metrics<R: SeriesRecord>(&self, table: Table, records: &[R], key: &R::Key) -> MetricsResult {
        let cache_key = MetricsKey::new(table.name(), &self.period, key);

        if let Some(cache) = &self.cache {
            match cache.get(&cache_key) {
                Ok(Some(cached)) => return cached,
                Ok(None) => {}
                Err(e) => warn!(key = %cache_key, error = %e, "Cache lookup failed"),
            }
        }

        let result = compute_metrics(records, &self.period, key, &self.config.months);

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&cache_key, &result) {
                warn!(key = %cache_key, error = %e, "Failed to cache metrics");
            }
        }
        result
    }
}

fn first_seen<'a>(segments: impl Iterator<Item = &'a SegmentId>) -> Vec<SegmentId> {
    let mut seen = BTreeSet::new();
    segments
        .filter(|s| seen.insert(*s))
        .cloned()
        .collect()
}

fn canonical(dimension: Dimension) -> Vec<SegmentId> {
    dimension
        .subcategories()
        .iter()
        .map(|&s| SegmentId::new(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use panel_cache::InMemoryCache;
    use panel_core::{CategoryRow, MonthValues, PanelError};
    use std::time::Duration;

    #[derive(Debug)]
    struct FailingCache;

    impl MetricsCache for FailingCache {
        fn get(&self, _key: &MetricsKey) -> Result<Option<MetricsResult>> {
            Err(PanelError::Cache("poisoned".into()))
        }

        fn put(&self, _key: &MetricsKey, _result: &MetricsResult) -> Result<()> {
            Err(PanelError::Cache("poisoned".into()))
        }

        fn invalidate_table(&self, _table: &str) -> Result<usize> {
            Err(PanelError::Cache("poisoned".into()))
        }

        fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
            Err(PanelError::Cache("poisoned".into()))
        }

        fn clear(&self) -> Result<()> {
            Err(PanelError::Cache("poisoned".into()))
        }
    }

    fn ramp(start: f64, end: f64) -> MonthValues {
        MonthValues::new(std::array::from_fn(|i| {
            start + (end - start) * i as f64 / 11.0
        }))
    }

    fn small_dataset() -> Dataset {
        Dataset {
            financial: vec![
                CategoryRow::new("2024", "Reksa Dana", ramp(100.0, 150.0)),
                CategoryRow::new("2024", "Pasar Modal", ramp(200.0, 200.0)),
                CategoryRow::new("2023", "Reksa Dana", ramp(80.0, 100.0)),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_segments_and_periods() {
        let dashboard = Dashboard::new(small_dataset());
        assert_eq!(
            dashboard.categories(),
            &[SegmentId::new("Reksa Dana"), SegmentId::new("Pasar Modal")]
        );
        assert_eq!(dashboard.periods(), vec![Period::new("2023"), Period::new("2024")]);
        assert_eq!(
            dashboard.selections(Table::Demographics).available(),
            Dashboard::subcategories(Dimension::Gender).as_slice()
        );
    }

    #[test]
    fn test_category_metrics_for_period() {
        let mut dashboard = Dashboard::new(small_dataset());
        dashboard.set_period("2024");

        let metrics = dashboard.category_metrics(&SegmentId::new("Reksa Dana"));
        assert_relative_eq!(metrics.growth, 50.0);
        assert_relative_eq!(metrics.roi(), 50.0);
        assert_eq!(metrics.highest_month, Some(Month::Dec));

        let missing = dashboard.category_metrics(&SegmentId::new("SBN"));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_summary_of_view_selection() {
        let mut dashboard = Dashboard::new(small_dataset());
        dashboard.set_period("2024");

        let summary = dashboard.summary(Table::Financial, View::Overview);
        assert_eq!(summary.segments, 2);
        assert_eq!(summary.top_segment, Some(SegmentId::new("Reksa Dana")));
        assert_relative_eq!(summary.average_growth, 25.0);

        dashboard
            .selections_mut(Table::Financial)
            .toggle(View::Overview, &SegmentId::new("Reksa Dana"));
        let summary = dashboard.summary(Table::Financial, View::Overview);
        assert_eq!(summary.segments, 1);
        assert_relative_eq!(summary.total, 2400.0);
    }

    #[test]
    fn test_metrics_are_served_from_cache() {
        let cache = Arc::new(InMemoryCache::new());
        let dashboard = Dashboard::new(small_dataset()).with_cache(cache.clone());
        let segment = SegmentId::new("Pasar Modal");

        let computed = dashboard.category_metrics(&segment);
        assert_eq!(cache.len().unwrap(), 1);

        // A planted entry wins over recomputation.
        let key = MetricsKey::new(FINANCIAL_TABLE, &PeriodFilter::All, &segment);
        let planted = MetricsResult {
            total: -1.0,
            ..computed
        };
        cache.put(&key, &planted).unwrap();
        assert_eq!(dashboard.category_metrics(&segment).total, -1.0);
    }

    #[test]
    fn test_cache_failures_do_not_fail_lookup() {
        let mut dashboard = Dashboard::new(small_dataset()).with_cache(Arc::new(FailingCache));
        dashboard.set_period("2024");

        let metrics = dashboard.category_metrics(&SegmentId::new("Reksa Dana"));
        assert_relative_eq!(metrics.growth, 50.0);
        assert!(dashboard.evict_stale().is_err());
    }

    #[test]
    fn test_set_dimension_resets_demographic_selection() {
        let mut dashboard = Dashboard::new(Dataset::default());
        dashboard
            .selections_mut(Table::Demographics)
            .clear(View::Comparison);

        dashboard.set_dimension(Dimension::Education);
        let selections = dashboard.selections(Table::Demographics);
        assert_eq!(selections.available().len(), 4);
        assert_eq!(selections.selected(View::Comparison).len(), 4);
    }

    #[test]
    fn test_bundled_dashboard_tables() {
        let mut dashboard = Dashboard::bundled().unwrap();
        assert_eq!(dashboard.regions().len(), 6);

        dashboard.set_measure(RegionMeasure::AssetTrillionRp);
        let quarterly = dashboard.quarterly(Table::Investors, View::Analysis);
        assert_eq!(quarterly.len(), 4);
        assert_eq!(quarterly.segments.len(), 6);


        let frame = dashboard
            .monthly(Table::Financial, View::Overview, Aggregation::Sum)
            .to_frame("month")
            .unwrap();
        assert_eq!(frame.height(), 12);
        assert_eq!(frame.width(), 5);
    }

    #[test]
    fn test_yearly_rows_follow_comparison_periods() {
        let mut dashboard = Dashboard::bundled().unwrap();
        dashboard.set_period("2024");
        let yearly = dashboard.yearly(Table::Investors, View::Analysis);
        let labels: Vec<&str> = yearly.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["2023", "2024"]);

        let config = PanelConfig::default().with_comparison_periods([Period::new("2024")]);
        let dashboard = Dashboard::bundled().unwrap().with_config(config);
        let yearly = dashboard.yearly(Table::Financial, View::Analysis);
        assert_eq!(yearly.len(), 1);
        assert_eq!(yearly.rows[0].label, Period::new("2024"));
    }

    #[test]
    fn test_bundled_comparison_and_totals() {
        let mut dashboard = Dashboard::bundled().unwrap();
        dashboard.set_dimension(Dimension::Age);

        let rows = dashboard.comparison(Table::Demographics, View::Comparison);
        assert_eq!(rows.len(), 5);
        // Every bundled year grows.
        assert!(rows.iter().all(|r| r.total > 0.0 && r.growth > 0.0));

        let totals = dashboard.totals(Table::Demographics, View::Overview);
        let summary = dashboard.summary(Table::Demographics, View::Overview);
        let sum: f64 = totals.iter().map(|p| p.value).sum();
        assert_relative_eq!(sum, summary.total, max_relative = 1e-12);
    }

    #[test]
    fn test_growth_table_passthrough() {
        let mut dashboard = Dashboard::new(small_dataset());
        dashboard.set_period("2023");
        let growth = dashboard.growth(Table::Financial, View::Analysis);
        assert_eq!(growth.get(&Month::Jan, &SegmentId::new("Reksa Dana")), Some(0.0));
        assert!(growth.get(&Month::Feb, &SegmentId::new("Reksa Dana")).unwrap() > 0.0);
        assert_eq!(growth.get(&Month::Feb, &SegmentId::new("Pasar Modal")), Some(0.0));
    }
}
