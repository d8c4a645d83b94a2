//! Core domain types and port definitions for imgvault.
//!
//! This crate is adapter-agnostic: it knows nothing about HTTP servers,
//! Cloudinary, or ZIP encoders. Adapters implement the port traits and
//! the services here compose them.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ArchiveEntry, ArchiveRequest, FetchOutcome, FetchedBody, FetchedResource, ImageAsset,
    ImagePage, ListQuery, MISSING_IMAGES_MESSAGE, TagQuery, TagSearchQuery,
};
pub use ports::{
    CoreError, FetchError, MediaPortError, MediaPortResult, MediaStorePort, ResourceFetcherPort,
};
pub use services::{MediaCatalog, MediaPages, PageParams};

// Dev-dependencies used only by integration-style unit tests
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio as _;
