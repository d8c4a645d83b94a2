//! CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use imgvault_cli::{Cli, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so it can feed env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve(args) => handlers::serve::execute(&args).await?,
    }

    Ok(())
}
