//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to the services in `AxumContext`.

pub mod download;
pub mod media;
