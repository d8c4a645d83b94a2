//! Streaming ZIP archive builder for remote images.
//!
//! Fetches a list of URLs, sniffs each body's image type, names it with a
//! random identifier and streams the entries out as one ZIP container while
//! it is still being built.
//!
//! - [`HttpFetcher`] - single-attempt reqwest fetch plus magic-byte sniffing
//! - [`ArchiveStream`] - incremental ZIP encoder bound to a byte sink
//! - [`BatchOrchestrator`] - fetch → name → append over a request
//! - [`ArchiveService`] - spawns a build and hands back the body stream

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod batch;
mod config;
mod error;
mod fetcher;
mod naming;
mod service;
mod sniff;
mod stream;

// ============================================================================
// Public API
// ============================================================================

pub use batch::{BatchOrchestrator, BatchSummary};
pub use config::ArchiveConfig;
pub use error::{ArchiveError, ArchiveResult};
pub use fetcher::HttpFetcher;
pub use naming::{NAME_ID_LEN, allocate_name};
pub use service::{ARCHIVE_CONTENT_TYPE, ArchiveBody, ArchiveDownload, ArchiveService};
pub use sniff::{FALLBACK_EXTENSION, extension_or_fallback, sniff_extension};
pub use stream::{ArchiveSink, ArchiveStream};

// Silence unused dev-dependency warnings
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio_test as _;
