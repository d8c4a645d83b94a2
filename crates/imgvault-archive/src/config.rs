//! Archive builder configuration.

use std::time::Duration;

use crate::error::{ArchiveError, ArchiveResult};

/// Configuration for fetching and encoding an archive.
///
/// # Example
///
/// ```
/// use imgvault_archive::ArchiveConfig;
/// use std::time::Duration;
///
/// let config = ArchiveConfig::new()
///     .with_max_concurrent_fetches(8)
///     .with_fetch_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Deflate level, 0 (store speed) to 9 (smallest)
    pub(crate) compression_level: i64,
    /// Maximum number of fetches in flight for one archive
    pub(crate) max_concurrent_fetches: usize,
    /// Timeout for one remote fetch, connect through last body byte
    pub(crate) fetch_timeout: Duration,
    /// Largest body accepted for a single resource
    pub(crate) max_resource_bytes: u64,
    /// File name advertised in `Content-Disposition`
    pub(crate) file_name: String,
    /// User agent sent to origin servers
    pub(crate) user_agent: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: 9,
            max_concurrent_fetches: 4,
            fetch_timeout: Duration::from_secs(30),
            max_resource_bytes: 50 * 1024 * 1024,
            file_name: "images.zip".to_string(),
            user_agent: concat!("imgvault-archive/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ArchiveConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deflate compression level (0-9).
    ///
    /// Defaults to 9.
    #[must_use]
    pub const fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = level;
        self
    }

    /// Set how many fetches may run at once. Zero is treated as one.
    ///
    /// Defaults to 4.
    #[must_use]
    pub const fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    /// Set the per-resource fetch timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the per-resource body size limit in bytes.
    ///
    /// Defaults to 50 MiB.
    #[must_use]
    pub const fn with_max_resource_bytes(mut self, limit: u64) -> Self {
        self.max_resource_bytes = limit;
        self
    }

    /// Set the download file name.
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Set the user agent sent to origin servers.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub const fn compression_level(&self) -> i64 {
        self.compression_level
    }

    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }

    pub const fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub const fn max_resource_bytes(&self) -> u64 {
        self.max_resource_bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Check settings that would otherwise only fail mid-stream.
    pub fn validate(&self) -> ArchiveResult<()> {
        if !(0..=9).contains(&self.compression_level) {
            return Err(ArchiveError::InvalidCompressionLevel(self.compression_level));
        }
        Ok(())
    }
}
