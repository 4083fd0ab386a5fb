pub mod error;
pub mod gallery;
mod http;
mod retry;
pub mod social;
pub mod types;

pub use error::SourceError;
pub use gallery::GalleryClient;
pub use http::HttpSettings;
pub use social::SocialClient;
pub use types::SocialImage;

use wanderlens_core::AppConfig;

impl HttpSettings {
    /// Derives adapter HTTP settings from the application config.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.http_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
        }
    }
}
