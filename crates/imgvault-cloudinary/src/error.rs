//! Internal error types for Cloudinary operations.
//!
//! These errors are internal to `imgvault-cloudinary` and are mapped to core
//! port errors at the boundary.

use thiserror::Error;

/// Result type alias for Cloudinary operations.
pub type CloudinaryResult<T> = Result<T, CloudinaryError>;

/// Errors related to Cloudinary API operations.
#[derive(Debug, Error)]
pub enum CloudinaryError {
    /// API request failed with an HTTP error status.
    #[error("Cloudinary API request failed with status {status}: {message}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Message from the error body, or the status reason
        message: String,
    },

    /// The requested resource does not exist.
    #[error("Resource not found: {public_id}")]
    ResourceNotFound { public_id: String },

    /// Missing or malformed configuration.
    #[error("Invalid Cloudinary configuration: {message}")]
    Configuration { message: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
