#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/panel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `DataFrame` export.
pub mod frame;
/// Month-major aggregated and growth tables.
pub mod monthly;
/// Quarter and period rollups.
pub mod periodic;
/// Table shapes.
pub mod table;
/// Per-segment selection totals.
pub mod totals;

pub use frame::points_to_frame;
pub use monthly::{growth_table, monthly_table};
pub use periodic::{quarterly_table, yearly_table};
pub use table::{SegmentPoint, SegmentSeries, SegmentTable, TableRow, transpose};
pub use totals::segment_totals;
