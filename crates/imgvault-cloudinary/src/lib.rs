//! Cloudinary media store adapter.
//!
//! Implements [`imgvault_core::MediaStorePort`] over the Cloudinary Admin API
//! (folder listing, single resource, resources by tag) and Search API
//! (multi-tag conjunction). Requests authenticate with HTTP basic auth using
//! the account's API key and secret.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// CloudinaryClient<B> is meant to be used through MediaStorePort, not its
// generic backend parameter
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultCloudinaryClient;

// Configuration
pub use config::{CloudinaryConfig, DEFAULT_BASE_URL};

// Errors
pub use error::{CloudinaryError, CloudinaryResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use tokio_test as _;
