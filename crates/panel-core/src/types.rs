//! Core selection and result types.
//!
//! This module defines the small value types a selection is made of and the
//! statistics computed for it:
//!
//! - [`Period`] - Top-level period identifier (a year such as `"2024"`)
//! - [`PeriodFilter`] - Either every period or one specific period
//! - [`SegmentId`] - Name of a category, region or demographic subcategory
//! - [`MonthValues`] - Twelve month values indexed by [`Month`]
//! - [`MetricsResult`] - Per-segment statistics for a selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::calendar::Month;

/// A top-level period identifier, such as `"2024"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(String);

impl Period {
    /// Creates a new period, trimming surrounding whitespace.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_string())
    }

    /// Returns the period as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Period {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Period {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Which periods a selection covers.
///
/// Serializes as `"All"` or as the period string itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PeriodFilter {
    /// Every period passes through.
    #[default]
    All,
    /// Only records of exactly this period.
    Only(Period),
}

impl PeriodFilter {
    /// Label used for the "every period" filter.
    pub const ALL_LABEL: &'static str = "All";

    /// Returns true if a record of `period` passes this filter.
    #[must_use]
    pub fn matches(&self, period: &Period) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => p == period,
        }
    }

    /// Returns true for [`PeriodFilter::All`].
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_LABEL),
            Self::Only(p) => write!(f, "{p}"),
        }
    }
}

impl From<String> for PeriodFilter {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case(Self::ALL_LABEL) {
            Self::All
        } else {
            Self::Only(Period::new(s))
        }
    }
}

impl From<&str> for PeriodFilter {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Period> for PeriodFilter {
    fn from(p: Period) -> Self {
        Self::Only(p)
    }
}

impl From<PeriodFilter> for String {
    fn from(filter: PeriodFilter) -> Self {
        filter.to_string()
    }
}

impl FromStr for PeriodFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Name of a segment: an investor category, a region, or a demographic
/// subcategory.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(String);

impl SegmentId {
    /// Creates a new segment id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the segment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SegmentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SegmentId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Twelve values, one per [`Month`].
///
/// Serializes as an object keyed by month label (`{"Jan": 1.0, ...}`); missing
/// months read as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "MonthValuesRepr", into = "MonthValuesRepr")]
pub struct MonthValues([f64; 12]);

impl MonthValues {
    /// Creates month values from an array in calendar order.
    #[must_use]
    pub const fn new(values: [f64; 12]) -> Self {
        Self(values)
    }

    /// Returns the value for `month`.
    #[must_use]
    pub const fn get(&self, month: Month) -> f64 {
        self.0[month.index()]
    }

    /// Sum of all twelve months.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Returns the values in calendar order.
    #[must_use]
    pub const fn as_array(&self) -> &[f64; 12] {
        &self.0
    }
}

impl Index<Month> for MonthValues {
    type Output = f64;

    fn index(&self, month: Month) -> &f64 {
        &self.0[month.index()]
    }
}

impl IndexMut<Month> for MonthValues {
    fn index_mut(&mut self, month: Month) -> &mut f64 {
        &mut self.0[month.index()]
    }
}

impl From<[f64; 12]> for MonthValues {
    fn from(values: [f64; 12]) -> Self {
        Self(values)
    }
}

#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(non_snake_case)]
struct MonthValuesRepr {
    Jan: f64,
    Feb: f64,
    Mar: f64,
    Apr: f64,
    May: f64,
    Jun: f64,
    Jul: f64,
    Aug: f64,
    Sep: f64,
    Oct: f64,
    Nov: f64,
    Dec: f64,
}

impl From<MonthValuesRepr> for MonthValues {
    fn from(r: MonthValuesRepr) -> Self {
        Self([
            r.Jan, r.Feb, r.Mar, r.Apr, r.May, r.Jun, r.Jul, r.Aug, r.Sep, r.Oct, r.Nov, r.Dec,
        ])
    }
}

impl From<MonthValues> for MonthValuesRepr {
    #[allow(non_snake_case)]
    fn from(v: MonthValues) -> Self {
        let [Jan, Feb, Mar, Apr, May, Jun, Jul, Aug, Sep, Oct, Nov, Dec] = v.0;
        Self {
            Jan,
            Feb,
            Mar,
            Apr,
            May,
            Jun,
            Jul,
            Aug,
            Sep,
            Oct,
            Nov,
            Dec,
        }
    }
}

/// Statistics for one segment under one selection.
///
/// Every field is zero (and `trend` empty) when the selection carries no data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Aggregated value of the last month.
    pub latest: f64,
    /// Aggregated value of the first month.
    pub initial: f64,
    /// Sum of the aggregated monthly values.
    pub total: f64,
    /// Percentage change from `initial` to `latest`; 0 when `initial` is 0.
    pub growth: f64,
    /// Month-over-month percentage changes; the first entry is always 0.
    pub trend: Vec<f64>,
    /// Population standard deviation of `trend`.
    pub volatility: f64,
    /// Largest aggregated monthly value.
    pub highest: f64,
    /// Month at which `highest` first occurs.
    pub highest_month: Option<Month>,
    /// Smallest positive aggregated monthly value, or 0 if none is positive.
    pub lowest_non_zero: f64,
    /// Month at which `lowest_non_zero` first occurs.
    pub lowest_month: Option<Month>,
}

impl MetricsResult {
    /// Return on investment over the selection.
    ///
    /// Uses the same formula as [`growth`](Self::growth) and always equals it;
    /// kept as a separate accessor for callers that label the figure as ROI.
    #[must_use]
    pub const fn roi(&self) -> f64 {
        self.growth
    }

    /// Returns true if this is the zero-valued result of an empty selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
