//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs.

use thiserror::Error;

/// Errors raised while validating the run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid Profile type {0} (It should be 1 or 2)")]
    InvalidProfileType(i64),

    #[error("Invalid time window: start {start}s is after end {end}s")]
    InvalidTimeWindow { start: i64, end: i64 },
}

/// Errors that can occur while loading a recording
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid recording format: {0}")]
    InvalidFormat(String),

    #[error("Failed to decompress recording: {0}")]
    Decompress(std::io::Error),
}

/// Errors raised when the selected event types match nothing
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("There are no events for type: [{0}]")]
    NoMatchingEventTypes(String),

    #[error("There are no events for type: [{0}]")]
    NoEvents(String),
}

/// Errors that can occur during output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
