//! Configuration types for the search client.

use std::time::Duration;

/// Default backend address.
pub const DEFAULT_URL: &str = "http://localhost:9200";

/// Configuration for the search client.
///
/// # Example
///
/// ```rust
/// use esquery_client::{CacheConfig, ClientConfig};
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .with_url("http://localhost:9200")
///     .with_index("person")
///     .with_cache(CacheConfig::default())
///     .with_timeout(Duration::from_secs(10))
///     .build();
///
/// assert_eq!(config.index_name.as_deref(), Some("person"));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the search backend.
    pub url: String,
    /// Target index (None = must be configured before searching).
    pub index_name: Option<String>,
    /// Ask the backend for an exact total hit count.
    pub track_total_hits: bool,
    /// Ask the backend to pretty-print its response.
    pub pretty: bool,
    /// Request timeout (None = transport default).
    pub timeout: Option<Duration>,
    /// Response cache configuration (None = caching disabled).
    pub cache: Option<CacheConfig>,
    /// Validate queries before sending them.
    pub strict: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            index_name: None,
            track_total_hits: true,
            pretty: false,
            timeout: None,
            cache: None,
            strict: false,
        }
    }
}

impl ClientConfig {
    /// Creates a new builder for ClientConfig.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Sets the backend base URL. A trailing slash is dropped.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.config.url = url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the target index.
    pub fn with_index(mut self, index_name: impl Into<String>) -> Self {
        self.config.index_name = Some(index_name.into());
        self
    }

    /// Enables or disables exact total hit counting.
    pub fn with_track_total_hits(mut self, track: bool) -> Self {
        self.config.track_total_hits = track;
        self
    }

    /// Enables or disables pretty-printed responses.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Enables response caching with the given configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = Some(cache);
        self
    }

    /// Enables or disables validation before sending.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Builds the ClientConfig.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached responses.
    pub max_entries: usize,
    /// Time-to-live for cached responses.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(60),
        }
    }
}
