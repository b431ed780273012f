#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/panel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Core types and traits
pub use panel_core::*;

// Cache implementations
pub use panel_cache::{InMemoryCache, NoopCache};

// Computation
pub use panel_reshape::{
    SegmentPoint, SegmentSeries, SegmentTable, TableRow, growth_table, monthly_table,
    points_to_frame, quarterly_table, segment_totals, transpose, yearly_table,
};
pub use panel_stats::{
    Aggregation, SegmentComparison, SegmentSummary, compare_segment, compute_metrics,
    compute_metrics_with, metrics_from_values,
};

// Data
pub use panel_fixtures::{DEMOGRAPHICS_TABLE, Dataset, FINANCIAL_TABLE, INVESTORS_TABLE};

mod dashboard;
mod selection;
pub use dashboard::{Dashboard, Table};
pub use selection::{View, ViewSelections};
