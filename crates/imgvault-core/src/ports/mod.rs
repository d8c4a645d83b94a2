//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest`, `zip` or `axum` types in any signature
//! - Adapter-specific errors are mapped to the port errors at the boundary

pub mod fetcher;
pub mod media_store;

use thiserror::Error;

pub use fetcher::{FetchError, ResourceFetcherPort};
pub use media_store::{MediaPortError, MediaPortResult, MediaStorePort};

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Media store operation failed.
    #[error(transparent)]
    Media(#[from] MediaPortError),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
