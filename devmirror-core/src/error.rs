//! Error types for devmirror-core

use thiserror::Error;

/// Main error type for the devmirror-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// An activity log entry carried a timestamp that could not be parsed.
    ///
    /// The whole batch is rejected rather than skewing the statistics.
    #[error("malformed timestamp {value:?} in log entry {index}")]
    MalformedTimestamp { index: usize, value: String },

    /// Remote analysis engine error
    #[error("engine error: {0}")]
    Engine(String),

    /// Analysis record not found
    #[error("analysis record not found: {0}")]
    RecordNotFound(i64),
}

/// Result type alias for devmirror-core
pub type Result<T> = std::result::Result<T, Error>;
