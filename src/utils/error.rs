//! Error handling for kvu
//!
//! Not finding a tuple is never an error. Errors are reserved for broken
//! preconditions (a key without a unit entry, an out-of-range table index)
//! and for the loaders of the `data-loading` feature.

use thiserror::Error;

/// Error type for extraction and loading
#[derive(Error, Debug)]
pub enum KvuError {
    /// A key of the domain knowledge has no unit entry
    #[error("Invalid domain knowledge: key '{key}' has no unit entry")]
    MissingUnitEntry { key: String },

    /// A table or cell index does not exist
    #[error("Index out of range: {what} {index} (len {len})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A regular expression built from domain knowledge failed to compile
    #[error("Invalid unit expression '{unit}': {source}")]
    UnitExpression {
        unit: String,
        #[source]
        source: regex::Error,
    },

    /// Input file has an unsupported extension
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "data-loading")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "data-loading")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "data-loading")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "data-loading")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for kvu operations
pub type KvuResult<T> = Result<T, KvuError>;

impl KvuError {
    pub fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        KvuError::OutOfRange { what, index, len }
    }
}
