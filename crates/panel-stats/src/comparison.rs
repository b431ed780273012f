//! Segment comparison table: selection total with growth and volatility.
//!
//! Unlike [`compute_metrics`](crate::compute_metrics), the comparison table
//! changes its time axis with the selection. A single period is compared
//! month by month; every period is compared year by year on period totals.
//! Steps whose previous value is not positive are skipped rather than
//! counted as zero change.

use panel_core::{Month, Period, PeriodFilter, SegmentId, SeriesRecord};
use serde::{Deserialize, Serialize};

use crate::formula::population_std_dev;
use crate::metrics::{Aggregation, aggregate_months};

/// One row of the comparison table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentComparison {
    /// Segment the row describes.
    pub segment: SegmentId,
    /// Sum of every month of every record in the selection.
    pub total: f64,
    /// Percentage growth over the comparison axis; 0 if the start is not
    /// positive.
    pub growth: f64,
    /// Population standard deviation of the step-wise percentage changes.
    pub volatility: f64,
}

/// Builds the comparison row of one segment.
///
/// `periods` gives the chronological order used when `filter` selects every
/// period; it is ignored otherwise.
pub fn compare_segment<R>(
    records: &[R],
    filter: &PeriodFilter,
    periods: &[Period],
    segment: impl Into<SegmentId>,
    key: &R::Key,
    months: &[Month],
) -> SegmentComparison
where
    R: SeriesRecord,
{
    let read = |record: &R, month: Month| record.value(key, month);
    let monthly = aggregate_months(records, filter, months, Aggregation::Sum, read)
        .unwrap_or_else(|| vec![0.0; months.len()]);
    let total = monthly.iter().sum();

    let axis: Vec<f64> = match filter {
        PeriodFilter::Only(_) => monthly,
        PeriodFilter::All => periods
            .iter()
            .map(|period| {
                aggregate_months(
                    records,
                    &PeriodFilter::Only(period.clone()),
                    months,
                    Aggregation::Sum,
                    read,
                )
                .map_or(0.0, |values| values.iter().sum())
            })
            .collect(),
    };

    SegmentComparison {
        segment: segment.into(),
        total,
        growth: endpoint_growth(&axis),
        volatility: population_std_dev(&positive_step_changes(&axis)),
    }
}

/// Growth from the first to the last value, 0 unless the first is positive.
fn endpoint_growth(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if first > 0.0 => (last - first) / first * 100.0,
        _ => 0.0,
    }
}

/// Percentage changes of each step whose previous value is positive.
fn positive_step_changes(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect()
}
