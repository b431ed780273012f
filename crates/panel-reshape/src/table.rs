//! Table shapes produced by the reshape helpers.

use panel_core::{Month, SegmentId};
use serde::{Deserialize, Serialize};

/// One value per segment, e.g. for a donut chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentPoint {
    /// Segment name.
    pub segment: SegmentId,
    /// Value of the segment.
    pub value: f64,
}

/// One segment's values in label order (segment-major layout).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentSeries {
    /// Segment name.
    pub segment: SegmentId,
    /// One value per label.
    pub values: Vec<f64>,
}

/// One labelled row of a [`SegmentTable`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableRow<L> {
    /// Row label (month, quarter or period).
    pub label: L,
    /// One value per segment, aligned with [`SegmentTable::segments`].
    pub values: Vec<f64>,
}

/// Label-major table with one column per segment.
///
/// This is the transposed layout multi-series charts read: each row is an x
/// position and each segment a series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentTable<L> {
    /// Column order.
    pub segments: Vec<SegmentId>,
    /// Rows in label order.
    pub rows: Vec<TableRow<L>>,
}

impl<L> SegmentTable<L> {
    /// Creates an empty table with the given columns.
    #[must_use]
    pub const fn new(segments: Vec<SegmentId>) -> Self {
        Self {
            segments,
            rows: Vec::new(),
        }
    }

    /// Appends a row. `values` must be aligned with the segment columns.
    pub fn push_row(&mut self, label: L, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.segments.len());
        self.rows.push(TableRow { label, values });
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the value of `segment` in the row labelled `label`.
    #[must_use]
    pub fn get(&self, label: &L, segment: &SegmentId) -> Option<f64>
    where
        L: PartialEq,
    {
        let column = self.segments.iter().position(|s| s == segment)?;
        self.rows
            .iter()
            .find(|row| &row.label == label)
            .and_then(|row| row.values.get(column).copied())
    }

    /// Returns one segment's column in row order.
    ///
    /// Returns `None` if the segment is unknown or a row is too short to hold
    /// it.
    #[must_use]
    pub fn column(&self, segment: &SegmentId) -> Option<Vec<f64>> {
        let column = self.segments.iter().position(|s| s == segment)?;
        self.rows
            .iter()
            .map(|row| row.values.get(column).copied())
            .collect()
    }

    /// Returns the first row whose width differs from the segment count.
    #[must_use]
    pub fn misaligned_row(&self) -> Option<&TableRow<L>> {
        self.rows
            .iter()
            .find(|row| row.values.len() != self.segments.len())
    }

    /// Converts back into segment-major series, one per column.
    #[must_use]
    pub fn into_series(self) -> Vec<SegmentSeries> {
        let len = self.rows.len();
        let mut series: Vec<SegmentSeries> = self
            .segments
            .into_iter()
            .map(|segment| SegmentSeries {
                segment,
                values: Vec::with_capacity(len),
            })
            .collect();
        for row in self.rows {
            for (s, value) in series.iter_mut().zip(row.values) {
                s.values.push(value);
            }
        }
        series
    }
}

/// Transposes segment-major series into a month-major table.
///
/// `series[i].values[j]` becomes the value of segment `i` in the row for
/// `months[j]`; missing values read as 0.
#[must_use]
pub fn transpose(series: &[SegmentSeries], months: &[Month]) -> SegmentTable<Month> {
    let mut table = SegmentTable::new(series.iter().map(|s| s.segment.clone()).collect());
    for (j, &month) in months.iter().enumerate() {
        let values = series
            .iter()
            .map(|s| s.values.get(j).copied().unwrap_or(0.0))
            .collect();
        table.push_row(month, values);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> Vec<SegmentSeries> {
        vec![
            SegmentSeries {
                segment: SegmentId::new("Pasar Modal"),
                values: (0..12).map(|i| 1000.0 + 12.5 * f64::from(i)).collect(),
            },
            SegmentSeries {
                segment: SegmentId::new("Reksa Dana"),
                values: (0..12).map(|i| 0.1 * f64::from(i) + 1.0 / 3.0).collect(),
            },
        ]
    }

    #[test]
    fn test_transpose_round_trip_is_exact() {
        let series = sample_series();
        let table = transpose(&series, &Month::ALL);

        assert_eq!(table.len(), 12);
        assert_eq!(table.rows[3].label, Month::Apr);
        assert_eq!(
            table.get(&Month::Apr, &SegmentId::new("Pasar Modal")),
            Some(series[0].values[3])
        );

        assert_eq!(table.into_series(), series);
    }

    #[test]
    fn test_column_and_missing_lookup() {
        let table = transpose(&sample_series(), &Month::ALL);
        let column = table.column(&SegmentId::new("Reksa Dana")).unwrap();
        assert_eq!(column.len(), 12);
        assert!(table.column(&SegmentId::new("SBN")).is_none());
        assert!(table.get(&Month::Jan, &SegmentId::new("SBN")).is_none());
    }

    #[test]
    fn test_transpose_pads_short_series() {
        let series = vec![SegmentSeries {
            segment: SegmentId::new("C-BEST"),
            values: vec![1.0, 2.0],
        }];
        let table = transpose(&series, &Month::ALL);
        assert_eq!(table.get(&Month::Feb, &SegmentId::new("C-BEST")), Some(2.0));
        assert_eq!(table.get(&Month::Mar, &SegmentId::new("C-BEST")), Some(0.0));
    }

    #[test]
    fn test_short_deserialized_row_does_not_panic() {
        let table: SegmentTable<Month> = serde_json::from_str(
            r#"{"segments": ["Jawa", "Sumatera"], "rows": [{"label": "Jan", "values": [1.0]}]}"#,
        )
        .unwrap();
        let jawa = SegmentId::new("Jawa");
        let sumatera = SegmentId::new("Sumatera");

        assert_eq!(table.get(&Month::Jan, &jawa), Some(1.0));
        assert_eq!(table.get(&Month::Jan, &sumatera), None);
        assert_eq!(table.column(&jawa), Some(vec![1.0]));
        assert_eq!(table.column(&sumatera), None);
        assert_eq!(table.misaligned_row().map(|r| r.label), Some(Month::Jan));
    }
}
