//! Error types for Instacap.
//!
//! `VisionError` belongs to the Computer Vision capability and is handed back
//! to callers exactly as the capability produced it. The caption adapter adds
//! no error kinds of its own.

use thiserror::Error;

/// Top-level error type for Instacap operations.
#[derive(Error, Debug)]
pub enum InstacapError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Vision capability errors
    #[error("Vision error: {0}")]
    Vision(#[from] VisionError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// No API key could be resolved for the vision service
    #[error("Vision API key not set: {0}")]
    MissingApiKey(String),
}

/// Errors raised by the Computer Vision capability.
#[derive(Error, Debug)]
pub enum VisionError {
    /// The image reference was rejected before any request was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request never produced an HTTP response (DNS, connect, TLS, ...)
    #[error("Vision request failed: {message}")]
    Request { message: String },

    /// The service answered with a non-success status
    #[error("Vision HTTP {status}{}: {message}", code_suffix(.code))]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The service answered 2xx but the body could not be decoded
    #[error("Failed to parse vision response: {0}")]
    Parse(String),

    /// Reading the image stream failed
    #[error("Failed to read image stream: {0}")]
    Io(#[from] std::io::Error),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
}

/// Convenience type alias for Instacap results.
pub type Result<T> = std::result::Result<T, InstacapError>;

/// Convenience type alias for vision-capability results.
pub type VisionResult<T> = std::result::Result<T, VisionError>;
