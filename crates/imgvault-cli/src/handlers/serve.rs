//! Serve command handler.

use anyhow::Result;
use imgvault_axum::start_server;
use tracing::info;

use crate::commands::ServeArgs;

/// Run the HTTP server until Ctrl-C.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let config = args.to_server_config();
    info!(
        port = config.port,
        media = config.cloudinary.is_some(),
        "Starting imgvault server"
    );
    start_server(config).await
}
