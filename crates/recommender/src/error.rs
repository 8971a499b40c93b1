//! Error types for the recommendation engine.

use data_loader::DataLoadError;
use thiserror::Error;

/// Errors that abort a recommend or search call.
///
/// Degraded inputs (unknown user, empty catalog, blank query) are not errors;
/// they produce empty or fallback results.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load data: {0}")]
    Data(#[from] DataLoadError),

    #[error("Result filtering failed: {0}")]
    Filter(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
