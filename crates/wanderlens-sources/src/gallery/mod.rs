//! Standard gallery adapter family.
//!
//! Combines multiple stock/archive providers server-side into a single flat
//! list of direct image URLs. A provider that errors is logged and skipped;
//! the combined call itself never fails, so one broken upstream cannot
//! suppress the others' results.

mod openverse;
mod wikimedia;

use reqwest::Client;

use crate::error::SourceError;
use crate::http::HttpSettings;

/// Client for the stock/archive image providers (Openverse, Wikimedia
/// Commons). Returns bare URLs; attribution-rich results come from the
/// social family instead.
pub struct GalleryClient {
    pub(crate) client: Client,
    pub(crate) settings: HttpSettings,
    pub(crate) openverse_base_url: String,
    pub(crate) wikimedia_base_url: String,
}

impl GalleryClient {
    /// Creates a `GalleryClient` with configured timeout, `User-Agent`, and
    /// retry policy. Base URLs are injectable so tests can target a local
    /// mock server.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        settings: HttpSettings,
        openverse_base_url: impl Into<String>,
        wikimedia_base_url: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let client = settings.build_client()?;
        Ok(Self {
            client,
            settings,
            openverse_base_url: trim_base(openverse_base_url.into()),
            wikimedia_base_url: trim_base(wikimedia_base_url.into()),
        })
    }

    /// Fetches up to `count` image URLs per provider for a location query,
    /// concatenated in provider order (Openverse first).
    ///
    /// Provider failures are logged at `warn` and skipped. An empty `Vec`
    /// means every provider failed or none had results.
    pub async fn fetch_location_gallery(&self, query: &str, count: usize) -> Vec<String> {
        let (openverse, wikimedia) = tokio::join!(
            openverse::fetch(self, query, count),
            wikimedia::fetch(self, query, count),
        );

        let mut urls = Vec::new();

        match openverse {
            Ok(batch) => {
                tracing::debug!(query, count = batch.len(), "collected Openverse images");
                urls.extend(batch);
            }
            Err(e) => {
                tracing::warn!(query, source = "openverse", error = %e, "Openverse fetch failed");
            }
        }

        match wikimedia {
            Ok(batch) => {
                tracing::debug!(query, count = batch.len(), "collected Wikimedia images");
                urls.extend(batch);
            }
            Err(e) => {
                tracing::warn!(query, source = "wikimedia", error = %e, "Wikimedia fetch failed");
            }
        }

        urls
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}
