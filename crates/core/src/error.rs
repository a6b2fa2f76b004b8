//! Error types for the sentiment-signal system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sentiment-signal system.
///
/// Sparse data (short price history, no sentiment) is not an error: it is
/// encoded in the annotated output as undefined values and HOLD signals.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration (window sizes, threshold).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Input violates the data contract (ordering, NaN, out-of-range).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML configuration parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a malformed input error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedInput(msg.into())
    }

    /// Whether this error was raised before any computation because of bad parameters.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::Toml(_))
    }
}
