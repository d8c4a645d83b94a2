//! Axum web server adapter for imgvault.
//!
//! Serves the media query routes and the streaming archive download under
//! `/api`, plus an unauthenticated `/health` probe.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tokio_test as _;
#[cfg(test)]
use tower as _;
#[cfg(test)]
use zip as _;

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;
