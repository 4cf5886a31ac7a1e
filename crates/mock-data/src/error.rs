//! Error types for the mock-data crate.
//!
//! Only `InvalidArgument` originates here; the other variants wrap failures
//! from the filesystem, the CSV codec or the session collaborator and are
//! propagated unchanged.

use thiserror::Error;

/// Errors that can occur while generating, staging or loading mock data
#[derive(Error, Debug)]
pub enum MockDataError {
    /// A request parameter was outside its valid range
    ///
    /// Raised before any generation work happens.
    #[error("Invalid value for '{param}': {value}. Valid range: [{min}-{max}]")]
    InvalidArgument {
        param: String,
        value: String,
        min: String,
        max: String,
    },

    /// The distributed session was stopped or never started
    #[error("Session unavailable: {0}")]
    SessionUnavailable(String),

    /// I/O error while creating the staging area or writing the staging file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV encoding or decoding failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A staged field could not be parsed as its declared column type
    #[error("Parse error at line {line} in column {column}: {reason}")]
    ParseError {
        column: String,
        line: usize,
        reason: String,
    },

    /// The staged file's header does not match the column-type mapping
    #[error("Schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A generator or session config could not be read
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
}

impl MockDataError {
    /// Shorthand for an out-of-range parameter
    pub fn invalid_argument(
        param: &str,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        MockDataError::InvalidArgument {
            param: param.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, MockDataError>;
