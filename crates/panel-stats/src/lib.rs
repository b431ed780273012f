#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/panel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Segment comparison table.
pub mod comparison;
/// Guarded percentage and dispersion formulas.
pub mod formula;
/// Per-segment metrics.
pub mod metrics;
/// Cross-segment summary.
pub mod summary;

pub use comparison::{SegmentComparison, compare_segment};
pub use formula::{mean, percent_change, population_std_dev};
pub use metrics::{
    Aggregation, aggregate_months, compute_metrics, compute_metrics_with, metrics_from_values,
};
pub use summary::SegmentSummary;
