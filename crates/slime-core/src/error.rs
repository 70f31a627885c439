//! Error types for value extraction and JSON bridging.

use thiserror::Error;

/// Errors that can occur while reading a slime tree or bridging it to JSON.
///
/// Absent values and duplicate field insertions are *not* errors: lookups
/// yield an invalid inspector and duplicate inserts yield an invalid cursor.
#[derive(Error, Debug)]
pub enum SlimeError {
    /// A strict accessor was called on a value of an incompatible type
    /// (e.g. `as_long()` on a STRING).
    #[error("invalid data extraction: cannot read {actual} as {requested}")]
    TypeMismatch {
        requested: &'static str,
        actual: &'static str,
    },

    /// A strict accessor on the generic access layer was called on a slot
    /// that holds no value at all.
    #[error("invalid data extraction: no value present to read as {requested}")]
    InvalidExtraction { requested: &'static str },

    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Convenience alias used throughout slime-core.
pub type Result<T> = std::result::Result<T, SlimeError>;
