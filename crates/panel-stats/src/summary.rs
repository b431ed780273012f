//! Cross-segment summary of per-segment metrics.

use panel_core::{MetricsResult, SegmentId};
use serde::{Deserialize, Serialize};

/// Dashboard totals over a set of selected segments.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Number of segments folded in.
    pub segments: usize,
    /// Sum of the per-segment totals.
    pub total: f64,
    /// Mean of the per-segment growth figures.
    pub average_growth: f64,
    /// Mean of the per-segment volatility figures.
    pub average_volatility: f64,
    /// Largest per-segment highest value; 0 for an empty summary.
    pub highest: f64,
    /// Segment holding `highest`.
    pub highest_segment: Option<SegmentId>,
    /// Smallest per-segment lowest non-zero value; segments whose lowest
    /// non-zero value is 0 are ignored. 0 if every segment is ignored.
    pub lowest_non_zero: f64,
    /// Segment holding `lowest_non_zero`.
    pub lowest_segment: Option<SegmentId>,
    /// Segment with the largest growth; the first one wins ties.
    pub top_segment: Option<SegmentId>,
}

impl SegmentSummary {
    /// Folds per-segment results into a summary.
    ///
    /// An empty input yields the zero-valued summary.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = (&'a SegmentId, &'a MetricsResult)>,
    {
        let mut summary = Self::default();
        let mut growth_sum = 0.0;
        let mut volatility_sum = 0.0;
        let mut top_growth = f64::NEG_INFINITY;

        for (segment, metrics) in results {
            summary.segments += 1;
            summary.total += metrics.total;
            growth_sum += metrics.growth;
            volatility_sum += metrics.volatility;

            if summary.highest_segment.is_none() || metrics.highest > summary.highest {
                summary.highest = metrics.highest;
                summary.highest_segment = Some(segment.clone());
            }
            if metrics.lowest_non_zero > 0.0
                && (summary.lowest_segment.is_none() || metrics.lowest_non_zero < summary.lowest_non_zero)
            {
                summary.lowest_non_zero = metrics.lowest_non_zero;
                summary.lowest_segment = Some(segment.clone());
            }
            if metrics.growth > top_growth {
                top_growth = metrics.growth;
                summary.top_segment = Some(segment.clone());
            }
        }

        if summary.segments > 0 {
            summary.average_growth = growth_sum / summary.segments as f64;
            summary.average_volatility = volatility_sum / summary.segments as f64;
        }
        summary
    }
}
