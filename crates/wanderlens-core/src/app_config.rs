use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Base URLs for every upstream image provider.
///
/// Carried in config so integration tests can point the adapters at a local
/// mock server instead of the live endpoints.
#[derive(Debug, Clone)]
pub struct ProviderUrls {
    pub openverse: String,
    pub wikimedia: String,
    pub reddit: String,
    pub pinterest: String,
    pub flickr: String,
}

impl Default for ProviderUrls {
    fn default() -> Self {
        Self {
            openverse: "https://api.openverse.org".to_string(),
            wikimedia: "https://commons.wikimedia.org".to_string(),
            reddit: "https://www.reddit.com".to_string(),
            pinterest: "https://www.pinterest.com".to_string(),
            flickr: "https://www.flickr.com".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// How many images to request from each source family per hierarchy level.
    pub images_per_source: usize,
    /// Combined image count below which the aggregator broadens the query.
    pub min_images_threshold: usize,
    pub provider_urls: ProviderUrls,
}
