//! Error types for the feed pipeline

use thiserror::Error;

/// Result type alias used across the library
pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Error)]
pub enum FeedError {
    /// The caller did not hand over text (missing, non-string or empty payload)
    #[error("Invalid input: expected {0} data as a string")]
    InvalidInput(&'static str),

    /// Not a single line of the batch could be parsed
    #[error("No valid {0} found in input")]
    NoValidRecords(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
