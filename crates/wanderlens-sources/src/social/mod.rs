//! Social adapter family: community image boards scraped without API keys.
//!
//! All three platforms are queried concurrently. A platform that errors is
//! logged and skipped so one outage cannot suppress the others' results —
//! the combined call itself never fails.

mod flickr;
mod pinterest;
mod reddit;

use reqwest::Client;

use crate::error::SourceError;
use crate::http::HttpSettings;
use crate::types::SocialImage;

/// Client for the community image platforms (Reddit, Pinterest, Flickr).
pub struct SocialClient {
    pub(crate) client: Client,
    pub(crate) settings: HttpSettings,
    pub(crate) reddit_base_url: String,
    pub(crate) pinterest_base_url: String,
    pub(crate) flickr_base_url: String,
}

impl SocialClient {
    /// Creates a `SocialClient` with configured timeout, `User-Agent`, and
    /// retry policy. Base URLs are injectable so tests can target a local
    /// mock server.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        settings: HttpSettings,
        reddit_base_url: impl Into<String>,
        pinterest_base_url: impl Into<String>,
        flickr_base_url: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let client = settings.build_client()?;
        Ok(Self {
            client,
            settings,
            reddit_base_url: trim_base(reddit_base_url.into()),
            pinterest_base_url: trim_base(pinterest_base_url.into()),
            flickr_base_url: trim_base(flickr_base_url.into()),
        })
    }

    /// Fetches up to `count` images per platform for a location query.
    ///
    /// Platform failures are logged at `warn` and skipped (Reddit degrades
    /// further, per subreddit). An empty `Vec` means every platform failed
    /// or none had results.
    pub async fn fetch_social_images(&self, query: &str, count: usize) -> Vec<SocialImage> {
        let (reddit, pinterest, flickr) = tokio::join!(
            reddit::fetch(self, query, count),
            pinterest::fetch(self, query, count),
            flickr::fetch(self, query, count),
        );

        let mut images = reddit;

        match pinterest {
            Ok(batch) => {
                tracing::debug!(query, count = batch.len(), "collected Pinterest images");
                images.extend(batch);
            }
            Err(e) => {
                tracing::warn!(query, source = "pinterest", error = %e, "Pinterest fetch failed");
            }
        }

        match flickr {
            Ok(batch) => {
                tracing::debug!(query, count = batch.len(), "collected Flickr images");
                images.extend(batch);
            }
            Err(e) => {
                tracing::warn!(query, source = "flickr", error = %e, "Flickr fetch failed");
            }
        }

        images
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}
