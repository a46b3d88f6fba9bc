//! Error types for the GovReport library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for GovReport operations.
#[derive(Debug, Error)]
pub enum GovReportError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Columns of a dataset have different lengths.
    #[error("Column '{column}' has {found} values, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Empty file or no data to profile.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Input exceeds the configured size limit.
    #[error("File too large: {size_mb:.1} MB exceeds the {limit_mb:.1} MB limit")]
    FileTooLarge { size_mb: f64, limit_mb: f64 },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A serialized data profile is missing required fields.
    #[error("Malformed data profile: {0}")]
    MalformedProfile(String),

    /// A serialized report specification is missing required fields.
    #[error("Malformed report spec: {0}")]
    MalformedSpec(String),

    /// Requested template id is not part of the built-in set.
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),
}

/// Result type alias for GovReport operations.
pub type Result<T> = std::result::Result<T, GovReportError>;
