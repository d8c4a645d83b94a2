//! Subcommand definitions.

use std::time::Duration;

use clap::{Args, Subcommand};
use imgvault_archive::ArchiveConfig;
use imgvault_axum::{CorsConfig, ServerConfig};
use imgvault_cloudinary::CloudinaryConfig;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
}

/// Settings for `imgvault serve`. Every flag can also come from the environment.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Cloudinary cloud name
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    pub cloud_name: Option<String>,

    /// Cloudinary API key
    #[arg(long, env = "CLOUDINARY_API_KEY")]
    pub api_key: Option<String>,

    /// Cloudinary API secret
    #[arg(long, env = "CLOUDINARY_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Comma-separated origins allowed by CORS; all origins when empty
    #[arg(long, env = "IMGVAULT_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Image fetches in flight per archive
    #[arg(long, env = "IMGVAULT_FETCH_CONCURRENCY", default_value_t = 4)]
    pub fetch_concurrency: usize,

    /// Per-image fetch timeout in seconds
    #[arg(long, env = "IMGVAULT_FETCH_TIMEOUT_SECS", default_value_t = 30)]
    pub fetch_timeout_secs: u64,

    /// Deflate level for archive entries (0-9)
    #[arg(long, env = "IMGVAULT_COMPRESSION_LEVEL", default_value_t = 9,
          value_parser = clap::value_parser!(i64).range(0..=9))]
    pub compression_level: i64,
}

impl ServeArgs {
    /// Media store account, if all three credentials were given.
    fn cloudinary(&self) -> Option<CloudinaryConfig> {
        match (&self.cloud_name, &self.api_key, &self.api_secret) {
            (Some(name), Some(key), Some(secret)) => {
                Some(CloudinaryConfig::new(name.as_str(), key.as_str(), secret.as_str()))
            }
            _ => None,
        }
    }

    fn cors(&self) -> CorsConfig {
        let origins: Vec<String> = self
            .cors_origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if origins.is_empty() {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowOrigins(origins)
        }
    }

    pub fn to_server_config(&self) -> ServerConfig {
        ServerConfig {
            port: self.port,
            cors: self.cors(),
            archive: ArchiveConfig::new()
                .with_max_concurrent_fetches(self.fetch_concurrency)
                .with_fetch_timeout(Duration::from_secs(self.fetch_timeout_secs))
                .with_compression_level(self.compression_level),
            cloudinary: self.cloudinary(),
        }
    }
}
