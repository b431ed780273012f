#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/panel/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # Example
//!
//! ```
//! use panel_fixtures::Dataset;
//!
//! # fn example() -> panel_core::Result<()> {
//! let dataset = Dataset::bundled()?;
//! println!("{} financial rows", dataset.financial.len());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;

use panel_core::{CategoryRow, DemographicRow, PanelError, Period, RegionRow, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Table name of the per-category financial dataset.
pub const FINANCIAL_TABLE: &str = "financial";

/// Table name of the regional investor dataset.
pub const INVESTORS_TABLE: &str = "investors";

/// Table name of the demographic dataset.
pub const DEMOGRAPHICS_TABLE: &str = "demographics";

const FINANCIAL_JSON: &str = include_str!("../data/financial.json");
const INVESTORS_JSON: &str = include_str!("../data/investors.json");
const DEMOGRAPHICS_JSON: &str = include_str!("../data/demographics.json");

/// The three dashboard tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Monthly values per year and category.
    pub financial: Vec<CategoryRow>,
    /// Regional investor figures per year and month.
    pub investors: Vec<RegionRow>,
    /// Demographic asset figures per year and month.
    pub demographics: Vec<DemographicRow>,
}

impl Dataset {
    /// Parses the bundled fixture files.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Parse`] if a bundled file is malformed.
    pub fn bundled() -> Result<Self> {
        Self::from_json(FINANCIAL_JSON, INVESTORS_JSON, DEMOGRAPHICS_JSON)
    }

    /// Parses caller-supplied JSON arrays, one per table.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Parse`] naming the table that failed to parse.
    pub fn from_json(financial: &str, investors: &str, demographics: &str) -> Result<Self> {
        let dataset = Self {
            financial: parse_table(FINANCIAL_TABLE, financial)?,
            investors: parse_table(INVESTORS_TABLE, investors)?,
            demographics: parse_table(DEMOGRAPHICS_TABLE, demographics)?,
        };
        debug!(
            financial = dataset.financial.len(),
            investors = dataset.investors.len(),
            demographics = dataset.demographics.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Returns every period present in any table, sorted.
    #[must_use]
    pub fn periods(&self) -> Vec<Period> {
        let periods: BTreeSet<&Period> = self
            .financial
            .iter()
            .map(|r| &r.year)
            .chain(self.investors.iter().map(|r| &r.year))
            .chain(self.demographics.iter().map(|r| &r.year))
            .collect();
        periods.into_iter().cloned().collect()
    }
}

fn parse_table<T: DeserializeOwned>(table: &str, json: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|e| PanelError::Parse(format!("{table}: {e}")))
}
