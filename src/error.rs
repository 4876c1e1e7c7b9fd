//! Detector error handling.

use thiserror::Error;

/// Errors raised while building a detector from its configuration.
///
/// Analysis itself never fails; every variant here surfaces at construction
/// time, before any document is scanned.
#[derive(Error, Debug)]
pub enum PorkError {
    /// A pattern in the library is not a valid regular expression.
    #[error("Invalid {group} pattern '{name}': {source}")]
    InvalidPattern {
        /// Library section the pattern belongs to (e.g. "item_categories").
        group: &'static str,
        /// Human-readable pattern name.
        name: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid detector configuration: {0}")]
    InvalidConfig(String),
}
