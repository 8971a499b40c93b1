//! Error types for the data-loader crate.
//!
//! Only hard failures live here: unreadable files and payloads whose overall
//! shape is wrong. Malformed individual fields (genres, years, ids) are
//! tolerated by the parser and never surface as errors.

use thiserror::Error;

/// Errors that can occur while loading catalog and interaction data
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File contents were not valid JSON, or a typed record didn't deserialize
    #[error("JSON error in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed but isn't shaped the way the loader expects
    ///
    /// e.g. a catalog that is neither a list nor an object with a `movies` list
    #[error("Invalid payload in {file}: {reason}")]
    InvalidPayload { file: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
