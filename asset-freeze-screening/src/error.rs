//! Error types for asset-freeze screening

use thiserror::Error;

/// Result type for screening operations
pub type Result<T> = std::result::Result<T, Error>;

/// Screening errors
#[derive(Error, Debug)]
pub enum Error {
    /// Portfolio entry is missing a required field
    #[error("Invalid portfolio entry at row {row}: missing field `{field}`")]
    InvalidPortfolioEntry {
        /// 0-based position of the entry in the portfolio
        row: usize,
        /// Name of the missing column
        field: &'static str,
    },

    /// The registry produced no candidate names, nothing can be screened
    #[error("No candidates available: the registry yielded an empty candidate index")]
    NoCandidatesAvailable,

    /// Portfolio cannot be screened as a whole
    #[error("Invalid portfolio: {0}")]
    InvalidPortfolio(String),

    /// Portfolio file lacks a required column
    #[error("Missing portfolio column: {0}")]
    MissingColumn(String),

    /// Registry document does not follow the publication schema
    #[error("Registry decode error: {0}")]
    RegistryDecode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
