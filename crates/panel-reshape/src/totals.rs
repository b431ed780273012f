//! Per-segment selection totals.

use panel_core::{Month, PeriodFilter, SegmentId, SeriesRecord};

use crate::table::SegmentPoint;

/// Returns one point per segment holding the sum of every month of every
/// record in the selection.
///
/// Segments without data in the selection are kept with a value of 0, so the
/// output is aligned with `keys`.
pub fn segment_totals<R>(
    records: &[R],
    filter: &PeriodFilter,
    keys: &[(SegmentId, R::Key)],
    months: &[Month],
) -> Vec<SegmentPoint>
where
    R: SeriesRecord,
{
    let selected: Vec<&R> = records.iter().filter(|r| filter.matches(r.period())).collect();
    keys.iter()
        .map(|(segment, key)| {
            let value = selected
                .iter()
                .flat_map(|record| months.iter().filter_map(|&m| record.value(key, m)))
                .sum();
            SegmentPoint {
                segment: segment.clone(),
                value,
            }
        })
        .collect()
}
