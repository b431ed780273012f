//! Month-major tables: aggregated values and month-over-month growth.

use panel_core::{Month, PeriodFilter, SegmentId, SeriesRecord};
use panel_stats::{Aggregation, aggregate_months, percent_change};
use tracing::trace;

use crate::table::{SegmentSeries, SegmentTable, transpose};

/// Aggregates every segment per month and collects the segment-major series.
fn monthly_series<R>(
    records: &[R],
    filter: &PeriodFilter,
    keys: &[(SegmentId, R::Key)],
    months: &[Month],
    aggregation: Aggregation,
) -> Vec<SegmentSeries>
where
    R: SeriesRecord,
{
    keys.iter()
        .map(|(segment, key)| {
            let values = aggregate_months(records, filter, months, aggregation, |r: &R, m| {
                r.value(key, m)
            })
            .unwrap_or_else(|| {
                trace!(segment = %segment, period = %filter, "No data for segment");
                vec![0.0; months.len()]
            });
            SegmentSeries {
                segment: segment.clone(),
                values,
            }
        })
        .collect()
}

/// Builds one row per month with a column per segment.
///
/// With [`Aggregation::Sum`] the values match what
/// [`compute_metrics`](panel_stats::compute_metrics) sees; with
/// [`Aggregation::Mean`] selecting every period averages the same month of
/// different years instead.
pub fn monthly_table<R>(
    records: &[R],
    filter: &PeriodFilter,
    keys: &[(SegmentId, R::Key)],
    months: &[Month],
    aggregation: Aggregation,
) -> SegmentTable<Month>
where
    R: SeriesRecord,
{
    transpose(&monthly_series(records, filter, keys, months, aggregation), months)
}

/// Builds the month-over-month growth table.
///
/// Each cell is the percentage change of the summed value from the previous
/// month; the first month is always 0, as is any step from a zero month.
pub fn growth_table<R>(
    records: &[R],
    filter: &PeriodFilter,
    keys: &[(SegmentId, R::Key)],
    months: &[Month],
) -> SegmentTable<Month>
where
    R: SeriesRecord,
{
    let series: Vec<SegmentSeries> = monthly_series(records, filter, keys, months, Aggregation::Sum)
        .into_iter()
        .map(|s| SegmentSeries {
            values: std::iter::once(0.0)
                .chain(s.values.windows(2).map(|w| percent_change(w[0], w[1])))
                .take(s.values.len())
                .collect(),
            segment: s.segment,
        })
        .collect();
    transpose(&series, months)
}
