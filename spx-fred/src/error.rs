/// Error types for the FRED library
use thiserror::Error;

/// Main error type for FRED operations
#[derive(Error, Debug)]
pub enum FredError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// FRED answered with a non-success HTTP status
    #[error("FRED API returned {status}: {reason}")]
    Status { status: u16, reason: String },

    /// FRED answered with an error document
    #[error("FRED API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Response body was not valid JSON
    #[error("Failed to parse FRED response: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body was JSON but not the observations envelope
    #[error("Invalid data format received from FRED API: {0}")]
    InvalidFormat(String),

    /// No API key was configured
    #[error("FRED API key is missing. Pass --api-key or set FRED_API_KEY.")]
    MissingApiKey,
}

/// Type alias for Results using FredError
pub type Result<T> = std::result::Result<T, FredError>;
