#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/panel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types, traits and errors for investor panel metrics.
//!
//! This crate provides the foundational abstractions shared by the workspace:
//!
//! - [`SeriesRecord`](record::SeriesRecord) - Accessor trait over every dataset shape
//! - [`CategoryRow`](record::CategoryRow), [`RegionRow`](record::RegionRow),
//!   [`DemographicRow`](record::DemographicRow) - The three dataset shapes
//! - [`MetricsResult`](types::MetricsResult) - Per-segment statistics
//! - [`MetricsCache`](cache::MetricsCache) - Memoization abstraction
//! - [`PanelConfig`](config::PanelConfig) - Shared settings

/// Cache trait and key type for memoized metrics.
pub mod cache;
/// Fixed month and quarter calendar.
pub mod calendar;
/// Panel configuration.
pub mod config;
/// Error types for panel operations.
pub mod error;
/// Dataset record shapes and the accessor trait.
pub mod record;
/// Core value types (Period, SegmentId, MetricsResult, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{MetricsCache, MetricsKey};
pub use calendar::{Month, Quarter};
pub use config::PanelConfig;
pub use error::{PanelError, Result};
pub use record::{
    CategoryRow, DemographicCategories, DemographicKey, DemographicRow, DemographicSubcategory,
    Dimension, RegionKey, RegionMeasure, RegionRow, SeriesRecord,
};
pub use types::{MetricsResult, MonthValues, Period, PeriodFilter, SegmentId};
