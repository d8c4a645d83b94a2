//! Public configuration for the Cloudinary client.

use std::fmt;
use std::time::Duration;

/// Default Admin API root; the cloud name is appended per request.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Configuration for the Cloudinary client.
///
/// # Example
///
/// ```
/// use imgvault_cloudinary::CloudinaryConfig;
/// use std::time::Duration;
///
/// let config = CloudinaryConfig::new("demo", "key", "secret")
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Clone)]
pub struct CloudinaryConfig {
    /// Account (cloud) name
    pub(crate) cloud_name: String,
    /// API key, the basic-auth user
    pub(crate) api_key: String,
    /// API secret, the basic-auth password
    pub(crate) api_secret: String,
    /// Base URL for the Admin API
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl CloudinaryConfig {
    /// Create a configuration for one account.
    #[must_use]
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("imgvault-cloudinary/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the base URL for the Admin API.
    ///
    /// Defaults to `https://api.cloudinary.com/v1_1`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    /// True when every credential is present.
    pub fn is_complete(&self) -> bool {
        !self.cloud_name.trim().is_empty()
            && !self.api_key.trim().is_empty()
            && !self.api_secret.trim().is_empty()
    }
}

// Keep the secret out of logs.
impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}
