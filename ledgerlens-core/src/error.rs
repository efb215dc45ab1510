//! Error types for ledgerlens

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Required CSV headers are absent from the header row.
    #[error("CSV is missing required headers ({})", .missing.join(", "))]
    MalformedInput { missing: Vec<String> },

    #[error("Failed to process statement: {0}")]
    Service(String),

    #[error("Received empty data from the extraction service")]
    EmptyResponse,

    #[error("Unsupported statement file: {0}")]
    UnsupportedFile(String),

    #[error("An extraction is already in progress")]
    Busy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
