//! Dataset record shapes and the accessor trait that unifies them.
//!
//! Three shapes of static data are supported:
//!
//! - [`CategoryRow`] - One wide row per year and investment category
//! - [`RegionRow`] - One row per year, month and region with several measures
//! - [`DemographicRow`] - One row per year and month with assets nested by
//!   demographic [`Dimension`] and subcategory
//!
//! Each implements [`SeriesRecord`], so a single aggregation routine can read
//! a segment's monthly values out of any of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{
    calendar::Month,
    error::PanelError,
    types::{MonthValues, Period, SegmentId},
};

/// A record of a static time-series table.
///
/// `Key` identifies which segment's measure to read. A record returns `None`
/// from [`value`](Self::value) when it carries no data for that segment and
/// month; aggregation treats that as a zero contribution.
pub trait SeriesRecord {
    /// Segment key for this record shape.
    type Key: fmt::Display;

    /// The top-level period of this record.
    fn period(&self) -> &Period;

    /// The measure for `key` at `month`, if this record carries it.
    fn value(&self, key: &Self::Key, month: Month) -> Option<f64>;
}

/// Monthly values of one investment category for one year.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    /// Year of the row.
    pub year: Period,
    /// Investment category, e.g. `"Reksa Dana"`.
    pub category: SegmentId,
    /// Value for each month.
    #[serde(flatten)]
    pub months: MonthValues,
}

impl CategoryRow {
    /// Creates a category row.
    #[must_use]
    pub fn new(year: impl Into<Period>, category: impl Into<SegmentId>, months: MonthValues) -> Self {
        Self {
            year: year.into(),
            category: category.into(),
            months,
        }
    }
}

impl SeriesRecord for CategoryRow {
    type Key = SegmentId;

    fn period(&self) -> &Period {
        &self.year
    }

    fn value(&self, key: &SegmentId, month: Month) -> Option<f64> {
        (&self.category == key).then(|| self.months[month])
    }
}

/// Which measure of a [`RegionRow`] to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionMeasure {
    /// Share of investors in the region.
    #[default]
    InvestorPercentage,
    /// Asset value in trillions of rupiah.
    AssetTrillionRp,
    /// Share of assets held in the region.
    AssetPercentage,
}

impl RegionMeasure {
    /// Field name of the measure in the dataset.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvestorPercentage => "investorPercentage",
            Self::AssetTrillionRp => "assetTrillionRp",
            Self::AssetPercentage => "assetPercentage",
        }
    }
}

impl fmt::Display for RegionMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegionMeasure {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::InvestorPercentage,
            Self::AssetTrillionRp,
            Self::AssetPercentage,
        ]
        .into_iter()
        .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| PanelError::UnknownMeasure(s.to_string()))
    }
}

/// Investor distribution of one region for one month.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRow {
    /// Year of the row.
    pub year: Period,
    /// Region name, e.g. `"Jawa"`.
    pub region: SegmentId,
    /// Month of the row.
    pub month: Month,
    /// Share of investors in the region.
    #[serde(default)]
    pub investor_percentage: f64,
    /// Asset value in trillions of rupiah.
    #[serde(default)]
    pub asset_trillion_rp: f64,
    /// Share of assets held in the region.
    #[serde(default)]
    pub asset_percentage: f64,
}

impl RegionRow {
    /// Returns the requested measure.
    #[must_use]
    pub const fn measure(&self, measure: RegionMeasure) -> f64 {
        match measure {
            RegionMeasure::InvestorPercentage => self.investor_percentage,
            RegionMeasure::AssetTrillionRp => self.asset_trillion_rp,
            RegionMeasure::AssetPercentage => self.asset_percentage,
        }
    }
}

/// Segment key for [`RegionRow`]: a region and the measure to read.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionKey {
    /// Region name.
    pub region: SegmentId,
    /// Measure to read.
    pub measure: RegionMeasure,
}

impl RegionKey {
    /// Creates a region key.
    #[must_use]
    pub fn new(region: impl Into<SegmentId>, measure: RegionMeasure) -> Self {
        Self {
            region: region.into(),
            measure,
        }
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.region, self.measure)
    }
}

impl SeriesRecord for RegionRow {
    type Key = RegionKey;

    fn period(&self) -> &Period {
        &self.year
    }

    fn value(&self, key: &RegionKey, month: Month) -> Option<f64> {
        (self.month == month && self.region == key.region).then(|| self.measure(key.measure))
    }
}

/// A demographic axis along which individual investors are broken down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Gender.
    #[default]
    Gender,
    /// Age bracket.
    Age,
    /// Occupation.
    Occupation,
    /// Highest education.
    Education,
    /// Income bracket.
    Income,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Self; 5] = [
        Self::Gender,
        Self::Age,
        Self::Occupation,
        Self::Education,
        Self::Income,
    ];

    /// Field name of the dimension in the dataset.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Occupation => "occupation",
            Self::Education => "education",
            Self::Income => "income",
        }
    }

    /// Canonical subcategories of this dimension, in display order.
    #[must_use]
    pub const fn subcategories(self) -> &'static [&'static str] {
        match self {
            Self::Gender => &["Laki-laki", "Perempuan"],
            Self::Age => &["<=30", "31-40", "41-50", "51-60", ">60"],
            Self::Occupation => &[
                "Ibu Rumah Tangga",
                "Pelajar",
                "Pegawai",
                "Pengusaha",
                "Lainnya",
            ],
            Self::Education => &["<= SMA", "D3", "S1", ">= S2"],
            Self::Income => &[
                "<= Rp10 juta",
                "Rp10-100 juta",
                "Rp100-500 juta",
                ">Rp500 juta",
            ],
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dimension {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PanelError::UnknownDimension(s.to_string()))
    }
}

/// Asset figures of one demographic subcategory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicSubcategory {
    /// Asset value in trillions of rupiah.
    pub asset_trillion_rp: f64,
}

/// Subcategory figures grouped by dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicCategories {
    /// Breakdown by gender.
    pub gender: BTreeMap<String, DemographicSubcategory>,
    /// Breakdown by age bracket.
    pub age: BTreeMap<String, DemographicSubcategory>,
    /// Breakdown by occupation.
    pub occupation: BTreeMap<String, DemographicSubcategory>,
    /// Breakdown by education.
    pub education: BTreeMap<String, DemographicSubcategory>,
    /// Breakdown by income bracket.
    pub income: BTreeMap<String, DemographicSubcategory>,
}

impl DemographicCategories {
    /// Returns the subcategories of one dimension.
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> &BTreeMap<String, DemographicSubcategory> {
        match dimension {
            Dimension::Gender => &self.gender,
            Dimension::Age => &self.age,
            Dimension::Occupation => &self.occupation,
            Dimension::Education => &self.education,
            Dimension::Income => &self.income,
        }
    }

    /// Returns the subcategories of one dimension for modification.
    pub fn get_mut(&mut self, dimension: Dimension) -> &mut BTreeMap<String, DemographicSubcategory> {
        match dimension {
            Dimension::Gender => &mut self.gender,
            Dimension::Age => &mut self.age,
            Dimension::Occupation => &mut self.occupation,
            Dimension::Education => &mut self.education,
            Dimension::Income => &mut self.income,
        }
    }
}

/// Individual-investor demographics for one month.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DemographicRow {
    /// Year of the row.
    pub year: Period,
    /// Month of the row.
    pub month: Month,
    /// Asset figures by dimension and subcategory.
    pub categories: DemographicCategories,
}

/// Segment key for [`DemographicRow`]: a dimension and one of its subcategories.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemographicKey {
    /// Dimension to traverse.
    pub dimension: Dimension,
    /// Subcategory within the dimension.
    pub subcategory: SegmentId,
}

impl DemographicKey {
    /// Creates a demographic key.
    #[must_use]
    pub fn new(dimension: Dimension, subcategory: impl Into<SegmentId>) -> Self {
        Self {
            dimension,
            subcategory: subcategory.into(),
        }
    }
}

impl fmt::Display for DemographicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.dimension, self.subcategory)
    }
}

impl SeriesRecord for DemographicRow {
    type Key = DemographicKey;

    fn period(&self) -> &Period {
        &self.year
    }

    fn value(&self, key: &DemographicKey, month: Month) -> Option<f64> {
        if self.month != month {
            return None;
        }
        self.categories
            .get(key.dimension)
            .get(key.subcategory.as_str())
            .map(|s| s.asset_trillion_rp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_row_json() {
        let row: CategoryRow = serde_json::from_str(
            r#"{"year": "2024", "category": "SBN", "Jan": 100, "Feb": 110, "Dec": 150}"#,
        )
        .unwrap();
        assert_eq!(row.year, Period::new("2024"));
        assert_eq!(row.category.as_str(), "SBN");
        assert_eq!(row.months[Month::Feb], 110.0);
        assert_eq!(row.months[Month::Mar], 0.0);

        let sbn = SegmentId::new("SBN");
        assert_eq!(row.value(&sbn, Month::Dec), Some(150.0));
        assert_eq!(row.value(&SegmentId::new("C-BEST"), Month::Dec), None);
    }

    #[test]
    fn test_region_row_measure() {
        let row: RegionRow = serde_json::from_str(
            r#"{"year": "2023", "region": "Jawa", "month": "Mar",
                "investorPercentage": 68.5, "assetTrillionRp": 4200.0, "assetPercentage": 80.1}"#,
        )
        .unwrap();

        let investors = RegionKey::new("Jawa", RegionMeasure::InvestorPercentage);
        let assets = RegionKey::new("Jawa", RegionMeasure::AssetTrillionRp);
        assert_eq!(row.value(&investors, Month::Mar), Some(68.5));
        assert_eq!(row.value(&assets, Month::Mar), Some(4200.0));
        assert_eq!(row.value(&assets, Month::Apr), None);
        assert_eq!(
            row.value(&RegionKey::new("Sumatera", RegionMeasure::AssetTrillionRp), Month::Mar),
            None
        );
        assert_eq!(assets.to_string(), "Jawa/assetTrillionRp");
    }

    #[test]
    fn test_demographic_row_traverses_dimension() {
        let row: DemographicRow = serde_json::from_str(
            r#"{"year": "2024", "month": "Jan", "categories": {
                "gender": {"Laki-laki": {"assetTrillionRp": 300.5}, "Perempuan": {"assetTrillionRp": 200.0}},
                "age": {"<=30": {"assetTrillionRp": 50.0}}
            }}"#,
        )
        .unwrap();

        let male = DemographicKey::new(Dimension::Gender, "Laki-laki");
        let young = DemographicKey::new(Dimension::Age, "<=30");
        let missing = DemographicKey::new(Dimension::Income, ">Rp500 juta");
        assert_eq!(row.value(&male, Month::Jan), Some(300.5));
        assert_eq!(row.value(&young, Month::Jan), Some(50.0));
        assert_eq!(row.value(&male, Month::Feb), None);
        assert_eq!(row.value(&missing, Month::Jan), None);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Income".parse::<Dimension>().unwrap(), Dimension::Income);
        assert!("height".parse::<Dimension>().is_err());
        assert_eq!(
            "assetTrillionRp".parse::<RegionMeasure>().unwrap(),
            RegionMeasure::AssetTrillionRp
        );
        assert!(matches!(
            "volume".parse::<RegionMeasure>(),
            Err(PanelError::UnknownMeasure(_))
        ));
    }

    #[test]
    fn test_subcategory_lists() {
        assert_eq!(Dimension::Gender.subcategories().len(), 2);
        assert_eq!(Dimension::Age.subcategories().len(), 5);
        for dimension in Dimension::ALL {
            assert!(!dimension.subcategories().is_empty());
        }
    }
}
