//! Fixed calendar definitions.
//!
//! This module defines [`Month`], the twelve ordered sub-periods every
//! aggregation iterates, and [`Quarter`] for three-month groupings. The month
//! list is never derived from data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;

/// A calendar month, the sub-period of every dataset.
///
/// Serializes as the three-letter label used by the fixtures (`"Jan"`).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Month {
    /// January.
    #[default]
    Jan,
    /// February.
    Feb,
    /// March.
    Mar,
    /// April.
    Apr,
    /// May.
    May,
    /// June.
    Jun,
    /// July.
    Jul,
    /// August.
    Aug,
    /// September.
    Sep,
    /// October.
    Oct,
    /// November.
    Nov,
    /// December.
    Dec,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Self; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Zero-based position in the calendar (`Jan` is 0).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Three-letter label, as used in the datasets.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }

    /// The quarter this month belongs to.
    #[must_use]
    pub const fn quarter(self) -> Quarter {
        match self {
            Self::Jan | Self::Feb | Self::Mar => Quarter::Q1,
            Self::Apr | Self::May | Self::Jun => Quarter::Q2,
            Self::Jul | Self::Aug | Self::Sep => Quarter::Q3,
            Self::Oct | Self::Nov | Self::Dec => Quarter::Q4,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Month {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PanelError::UnknownMonth(s.to_string()))
    }
}

impl From<Month> for chrono::Month {
    fn from(month: Month) -> Self {
        match month {
            Month::Jan => Self::January,
            Month::Feb => Self::February,
            Month::Mar => Self::March,
            Month::Apr => Self::April,
            Month::May => Self::May,
            Month::Jun => Self::June,
            Month::Jul => Self::July,
            Month::Aug => Self::August,
            Month::Sep => Self::September,
            Month::Oct => Self::October,
            Month::Nov => Self::November,
            Month::Dec => Self::December,
        }
    }
}

impl From<chrono::Month> for Month {
    fn from(month: chrono::Month) -> Self {
        Self::ALL[month.number_from_month() as usize - 1]
    }
}

/// A calendar quarter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// January through March.
    Q1,
    /// April through June.
    Q2,
    /// July through September.
    Q3,
    /// October through December.
    Q4,
}

impl Quarter {
    /// All four quarters in order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// The three months of this quarter, in order.
    #[must_use]
    pub const fn months(self) -> [Month; 3] {
        match self {
            Self::Q1 => [Month::Jan, Month::Feb, Month::Mar],
            Self::Q2 => [Month::Apr, Month::May, Month::Jun],
            Self::Q3 => [Month::Jul, Month::Aug, Month::Sep],
            Self::Q4 => [Month::Oct, Month::Nov, Month::Dec],
        }
    }

    /// Label such as `"Q1"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_order_is_fixed() {
        let labels: Vec<_> = Month::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"
            ]
        );
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.index(), i);
        }
    }

    #[test]
    fn test_month_parse() {
        assert_eq!("Mar".parse::<Month>().unwrap(), Month::Mar);
        assert_eq!(" dec ".parse::<Month>().unwrap(), Month::Dec);
        assert!(matches!(
            "Smarch".parse::<Month>(),
            Err(PanelError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_chrono_conversion() {
        for month in Month::ALL {
            let chrono_month: chrono::Month = month.into();
            assert_eq!(Month::from(chrono_month), month);
        }
        assert_eq!(chrono::Month::from(Month::Sep), chrono::Month::September);
    }

    #[test]
    fn test_quarters_cover_calendar() {
        let months: Vec<Month> = Quarter::ALL.iter().flat_map(|q| q.months()).collect();
        assert_eq!(months, Month::ALL.to_vec());
        for month in Month::ALL {
            assert!(month.quarter().months().contains(&month));
        }
    }

    #[test]
    fn test_month_serde_label() {
        let json = serde_json::to_string(&Month::Aug).unwrap();
        assert_eq!(json, "\"Aug\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Month::Aug);
    }
}
