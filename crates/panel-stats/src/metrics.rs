//! Per-segment metrics over any [`SeriesRecord`] table.

use panel_core::{MetricsResult, Month, PeriodFilter, SeriesRecord};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::formula::{percent_change, population_std_dev};

/// How values of several records falling on the same month are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    /// Add every contribution. Under `PeriodFilter::All` this folds several
    /// years of the same month into one figure.
    #[default]
    Sum,
    /// Average of the contributing records; months without any contribution
    /// read as 0.
    Mean,
}

/// Aggregates one segment per month.
///
/// Records are filtered by `filter`, then for each month of `months` (in the
/// given order) the values `value` returns are combined with `aggregation`.
/// Records for which `value` returns `None` do not contribute.
///
/// Returns `None` when no filtered record contributes to any month.
pub fn aggregate_months<R, F>(
    records: &[R],
    filter: &PeriodFilter,
    months: &[Month],
    aggregation: Aggregation,
    value: F,
) -> Option<Vec<f64>>
where
    R: SeriesRecord,
    F: Fn(&R, Month) -> Option<f64>,
{
    let mut sums = vec![0.0; months.len()];
    let mut counts = vec![0usize; months.len()];

    for record in records.iter().filter(|r| filter.matches(r.period())) {
        for (i, &month) in months.iter().enumerate() {
            if let Some(v) = value(record, month) {
                sums[i] += v;
                counts[i] += 1;
            }
        }
    }

    if counts.iter().all(|&c| c == 0) {
        return None;
    }

    Some(match aggregation {
        Aggregation::Sum => sums,
        Aggregation::Mean => sums
            .into_iter()
            .zip(counts)
            .map(|(sum, count)| if count > 0 { sum / count as f64 } else { 0.0 })
            .collect(),
    })
}

/// Computes the metrics of the segment identified by `key`.
///
/// Equivalent to [`compute_metrics_with`] reading through
/// [`SeriesRecord::value`].
pub fn compute_metrics<R>(
    records: &[R],
    filter: &PeriodFilter,
    key: &R::Key,
    months: &[Month],
) -> MetricsResult
where
    R: SeriesRecord,
{
    compute_metrics_with(records, filter, months, |record, month| {
        record.value(key, month)
    })
}

/// Computes segment metrics from an arbitrary accessor.
///
/// Monthly values are summed across the filtered records, so selecting every
/// period adds the same month of different years together. A selection that
/// carries no data, or only zeros, yields [`MetricsResult::default`].
pub fn compute_metrics_with<R, F>(
    records: &[R],
    filter: &PeriodFilter,
    months: &[Month],
    value: F,
) -> MetricsResult
where
    R: SeriesRecord,
    F: Fn(&R, Month) -> Option<f64>,
{
    let Some(values) = aggregate_months(records, filter, months, Aggregation::Sum, value) else {
        trace!(period = %filter, "No records for selection");
        return MetricsResult::default();
    };
    if values.iter().all(|&v| v == 0.0) {
        trace!(period = %filter, "All monthly values are zero");
        return MetricsResult::default();
    }
    metrics_from_values(months, &values)
}

/// Computes metrics from aggregated monthly values.
///
/// `values[i]` belongs to `months[i]`; both slices must have the same length.
/// An empty slice yields [`MetricsResult::default`].
#[must_use]
pub fn metrics_from_values(months: &[Month], values: &[f64]) -> MetricsResult {
    let (Some(&initial), Some(&latest)) = (values.first(), values.last()) else {
        return MetricsResult::default();
    };

    let trend: Vec<f64> = std::iter::once(0.0)
        .chain(values.windows(2).map(|w| percent_change(w[0], w[1])))
        .filter(|v| !v.is_nan())
        .collect();

    let mut highest: Option<(f64, Month)> = None;
    let mut lowest: Option<(f64, Month)> = None;
    for (&value, &month) in values.iter().zip(months) {
        if highest.is_none_or(|(h, _)| value > h) && !value.is_nan() {
            highest = Some((value, month));
        }
        if value > 0.0 && lowest.is_none_or(|(l, _)| value < l) {
            lowest = Some((value, month));
        }
    }

    MetricsResult {
        latest,
        initial,
        total: values.iter().sum(),
        growth: percent_change(initial, latest),
        volatility: population_std_dev(&trend),
        trend,
        highest: highest.map_or(0.0, |(v, _)| v),
        highest_month: highest.map(|(_, m)| m),
        lowest_non_zero: lowest.map_or(0.0, |(v, _)| v),
        lowest_month: lowest.map(|(_, m)| m),
    }
}
