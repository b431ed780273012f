//! `polars` export of reshaped tables.

use std::fmt::Display;

use panel_core::{PanelError, Result};
use polars::prelude::*;
use tracing::debug;

use crate::table::{SegmentPoint, SegmentTable};

impl<L: Display> SegmentTable<L> {
    /// Converts the table into a `DataFrame`.
    ///
    /// The first column holds the row labels under `label_column`, followed by
    /// one `f64` column per segment named after it.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Frame`] if a row's width differs from the
    /// segment count or column names collide.
    pub fn to_frame(&self, label_column: &str) -> Result<DataFrame> {
        if let Some(row) = self.misaligned_row() {
            return Err(PanelError::Frame(format!(
                "row {} has {} values for {} segments",
                row.label,
                row.values.len(),
                self.segments.len()
            )));
        }
        let labels: Vec<String> = self.rows.iter().map(|row| row.label.to_string()).collect();
        let mut columns = Vec::with_capacity(self.segments.len() + 1);
        columns.push(Column::new(label_column.into(), labels));

        for (i, segment) in self.segments.iter().enumerate() {
            let values: Vec<f64> = self.rows.iter().map(|row| row.values[i]).collect();
            columns.push(Column::new(segment.as_str().into(), values));
        }

        debug!(rows = self.rows.len(), segments = self.segments.len(), "Building frame");
        DataFrame::new(columns).map_err(|e| PanelError::Frame(e.to_string()))
    }
}

/// Converts segment points into a two-column `DataFrame` (`segment`, `value`).
///
/// # Errors
///
/// Returns [`PanelError::Frame`] if the frame cannot be built.
pub fn points_to_frame(points: &[SegmentPoint]) -> Result<DataFrame> {
    let segments: Vec<&str> = points.iter().map(|p| p.segment.as_str()).collect();
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    DataFrame::new(vec![
        Column::new("segment".into(), segments),
        Column::new("value".into(), values),
    ])
    .map_err(|e| PanelError::Frame(e.to_string()))
}
