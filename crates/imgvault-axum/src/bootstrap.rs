//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use imgvault_archive::{ArchiveConfig, ArchiveService};
use imgvault_cloudinary::{CloudinaryConfig, DefaultCloudinaryClient};
use imgvault_core::{
    ImageAsset, ImagePage, ListQuery, MediaCatalog, MediaPortError, MediaPortResult,
    MediaStorePort, TagQuery, TagSearchQuery,
};
use tracing::{info, warn};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Archive builder settings.
    pub archive: ArchiveConfig,
    /// Media store account. Without it the media routes answer with an error.
    pub cloudinary: Option<CloudinaryConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            cors: CorsConfig::default(),
            archive: ArchiveConfig::default(),
            cloudinary: None,
        }
    }
}

impl ServerConfig {
    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// Holds every service the handlers need.
pub struct AxumContext {
    /// Media queries over the asset store.
    pub media: Arc<MediaCatalog>,
    /// Archive builds.
    pub archive: Arc<ArchiveService>,
}

impl AxumContext {
    /// Assemble a context from already-built adapters.
    pub fn new(media_store: Arc<dyn MediaStorePort>, archive: ArchiveService) -> Self {
        Self {
            media: Arc::new(MediaCatalog::new(media_store)),
            archive: Arc::new(archive),
        }
    }
}

/// Stand-in store used when no media account is configured.
struct UnconfiguredMediaStore;

impl UnconfiguredMediaStore {
    fn error<T>() -> MediaPortResult<T> {
        Err(MediaPortError::Configuration {
            message: "media store credentials are not configured".to_string(),
        })
    }
}

#[async_trait]
impl MediaStorePort for UnconfiguredMediaStore {
    async fn list_images(&self, _query: &ListQuery) -> MediaPortResult<ImagePage> {
        Self::error()
    }

    async fn get_image(&self, _public_id: &str) -> MediaPortResult<ImageAsset> {
        Self::error()
    }

    async fn list_by_tag(&self, _query: &TagQuery) -> MediaPortResult<ImagePage> {
        Self::error()
    }

    async fn search_by_tags(&self, _query: &TagSearchQuery) -> MediaPortResult<ImagePage> {
        Self::error()
    }
}

/// Build every service from configuration.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let media_store: Arc<dyn MediaStorePort> = match &config.cloudinary {
        Some(cloudinary) if cloudinary.is_complete() => {
            info!(
                target: "imgvault.bootstrap",
                cloud_name = %cloudinary.cloud_name(),
                "Media store configured"
            );
            Arc::new(
                DefaultCloudinaryClient::new(cloudinary)
                    .context("failed to create Cloudinary client")?,
            )
        }
        _ => {
            warn!(
                target: "imgvault.bootstrap",
                "Cloudinary credentials missing; media routes will fail"
            );
            Arc::new(UnconfiguredMediaStore)
        }
    };

    let archive = ArchiveService::from_config(config.archive.clone())
        .context("failed to create archive service")?;

    info!(
        target: "imgvault.bootstrap",
        concurrency = config.archive.max_concurrent_fetches(),
        timeout_secs = config.archive.fetch_timeout().as_secs(),
        "Archive service ready"
    );

    Ok(AxumContext::new(media_store, archive))
}

/// Start the web server on the configured port and serve until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("imgvault server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
            }
        })
        .await?;
    Ok(())
}
