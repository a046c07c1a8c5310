//! Common error types for the story reader

use thiserror::Error;

/// Common result type for story reader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the story reader crates
///
/// Lookups and navigation never fail; only construction, content loading,
/// configuration and audio transport commands produce these.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Story document could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Segment sequence violates ordering or span rules
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Invalid argument passed to a constructor
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// External audio transport rejected a command
    #[error("Audio transport error: {0}")]
    Transport(String),
}
