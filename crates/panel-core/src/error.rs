//! Error types for panel operations.
//!
//! This module defines [`PanelError`] which covers the failures that can occur
//! around the aggregation core: loading fixtures, parsing selection strings,
//! talking to a cache, or building a tabular export. Aggregation itself never
//! fails; empty selections produce zero-valued results instead.

use thiserror::Error;

/// Errors that can occur during panel operations.
#[derive(Error, Debug)]
pub enum PanelError {
    /// A dataset or configuration document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A month label outside `Jan`..`Dec`.
    #[error("Unknown month: {0}")]
    UnknownMonth(String),

    /// A demographic dimension name that is not recognized.
    #[error("Unknown demographic dimension: {0}")]
    UnknownDimension(String),

    /// A region measure name that is not recognized.
    #[error("Unknown region measure: {0}")]
    UnknownMeasure(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error interacting with the metrics cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Error building a tabular export.
    #[error("Frame error: {0}")]
    Frame(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias using [`PanelError`].
pub type Result<T> = std::result::Result<T, PanelError>;
