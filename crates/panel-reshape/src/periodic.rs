//! Quarter and period rollups.
//!
//! Quarters AVERAGE the non-zero contributions of their three months, while
//! periods SUM every month. Selecting every period therefore leaves quarterly
//! figures comparable to a single year but grows the yearly ones.

use panel_core::{Month, Period, PeriodFilter, Quarter, SegmentId, SeriesRecord};

use crate::table::SegmentTable;

/// Builds one row per quarter with each segment's average.
///
/// Every filtered record contributes its value for each month of the quarter;
/// missing and zero values are skipped. A quarter without contributions reads
/// as 0.
pub fn quarterly_table<R>(
    records: &[R],
    filter: &PeriodFilter,
    keys: &[(SegmentId, R::Key)],
) -> SegmentTable<Quarter>
where
    R: SeriesRecord,
{
    let selected: Vec<&R> = records.iter().filter(|r| filter.matches(r.period())).collect();
    let mut table = SegmentTable::new(keys.iter().map(|(s, _)| s.clone()).collect());

    for quarter in Quarter::ALL {
        let values = keys
            .iter()
            .map(|(_, key)| {
                let (sum, count) = selected
                    .iter()
                    .flat_map(|record| {
                        quarter
                            .months()
                            .into_iter()
                            .filter_map(|m| record.value(key, m))
                    })
                    .filter(|&v| v != 0.0)
                    .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
                if count > 0 { sum / count as f64 } else { 0.0 }
            })
            .collect();
        table.push_row(quarter, values);
    }
    table
}

/// Builds one row per period with each segment's sum over `months`.
///
/// Rows follow the order of `periods`; a segment absent from a period reads
/// as 0.
pub fn yearly_table<R>(
    records: &[R],
    periods: &[Period],
    keys: &[(SegmentId, R::Key)],
    months: &[Month],
) -> SegmentTable<Period>
where
    R: SeriesRecord,
{
    let mut table = SegmentTable::new(keys.iter().map(|(s, _)| s.clone()).collect());
    for period in periods {
        let in_period: Vec<&R> = records.iter().filter(|r| r.period() == period).collect();
        let values = keys
            .iter()
            .map(|(_, key)| {
                in_period
                    .iter()
                    .flat_map(|record| months.iter().filter_map(|&m| record.value(key, m)))
                    .sum()
            })
            .collect();
        table.push_row(period.clone(), values);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use panel_core::{CategoryRow, MonthValues};

    use crate::segment_totals;

    fn keys(names: &[&str]) -> Vec<(SegmentId, SegmentId)> {
        names
            .iter()
            .map(|&s| (SegmentId::new(s), SegmentId::new(s)))
            .collect()
    }

    fn ramp() -> MonthValues {
        MonthValues::new(std::array::from_fn(|i| (i + 1) as f64))
    }

    #[test]
    fn test_quarterly_averages() {
        let rows = vec![CategoryRow::new("2024", "Reksa Dana", ramp())];
        let table = quarterly_table(&rows, &PeriodFilter::All, &keys(&["Reksa Dana"]));
        let segment = SegmentId::new("Reksa Dana");

        assert_eq!(table.len(), 4);
        assert_relative_eq!(table.get(&Quarter::Q1, &segment).unwrap(), 2.0);
        assert_relative_eq!(table.get(&Quarter::Q4, &segment).unwrap(), 11.0);
    }

    #[test]
    fn test_quarterly_skips_zero_months() {
        let mut months = MonthValues::new([0.0; 12]);
        months[Month::Apr] = 6.0;
        months[Month::Jun] = 9.0;
        let rows = vec![CategoryRow::new("2024", "SBN", months)];
        let table = quarterly_table(&rows, &PeriodFilter::All, &keys(&["SBN"]));
        let segment = SegmentId::new("SBN");

        assert_eq!(table.get(&Quarter::Q1, &segment), Some(0.0));
        assert_relative_eq!(table.get(&Quarter::Q2, &segment).unwrap(), 7.5);
    }

    #[test]
    fn test_yearly_sums_in_period_order() {
        let rows = vec![
            CategoryRow::new("2024", "C-BEST", MonthValues::new([2.0; 12])),
            CategoryRow::new("2023", "C-BEST", MonthValues::new([1.0; 12])),
        ];
        let periods = [Period::new("2023"), Period::new("2024"), Period::new("2025")];
        let table = yearly_table(&rows, &periods, &keys(&["C-BEST"]), &Month::ALL);
        let segment = SegmentId::new("C-BEST");

        assert_eq!(table.rows[0].label, periods[0]);
        assert_eq!(table.get(&periods[0], &segment), Some(12.0));
        assert_eq!(table.get(&periods[1], &segment), Some(24.0));
        assert_eq!(table.get(&periods[2], &segment), Some(0.0));
    }

    #[test]
    fn test_all_periods_double_sums_but_not_averages() {
        // Two periods carrying identical data.
        let rows = vec![
            CategoryRow::new("2023", "Pasar Modal", ramp()),
            CategoryRow::new("2024", "Pasar Modal", ramp()),
        ];
        let keys = keys(&["Pasar Modal"]);
        let segment = SegmentId::new("Pasar Modal");
        let single = PeriodFilter::from("2024");

        let one = segment_totals(&rows, &single, &keys, &Month::ALL);
        let both = segment_totals(&rows, &PeriodFilter::All, &keys, &Month::ALL);
        assert_relative_eq!(both[0].value, 2.0 * one[0].value);

        let q_one = quarterly_table(&rows, &single, &keys);
        let q_both = quarterly_table(&rows, &PeriodFilter::All, &keys);
        for quarter in Quarter::ALL {
            assert_relative_eq!(
                q_both.get(&quarter, &segment).unwrap(),
                q_one.get(&quarter, &segment).unwrap()
            );
        }

        let periods = [Period::new("2023"), Period::new("2024")];
        let yearly = yearly_table(&rows, &periods, &keys, &Month::ALL);
        let sum: f64 = yearly.column(&segment).unwrap().iter().sum();
        assert_relative_eq!(sum, both[0].value);
    }
}
