//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the image archive and media query server.
#[derive(Parser)]
#[command(name = "imgvault")]
#[command(about = "Stream ZIP archives of remote images and query a Cloudinary media library")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub const fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
