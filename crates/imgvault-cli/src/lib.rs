//! Command-line entry point for the imgvault server.
//!
//! `imgvault serve` reads its settings from flags or the environment (a
//! `.env` file is loaded first) and runs the HTTP server until Ctrl-C.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod commands;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::{Commands, ServeArgs};
pub use parser::Cli;
