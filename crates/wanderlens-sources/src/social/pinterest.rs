//! Pinterest image collector over the public `BaseSearchResource` endpoint
//! (no API key).
//!
//! The endpoint expects the search options as a JSON blob in the `data`
//! query parameter. Pins carry several pre-rendered sizes; the original
//! (`orig`) is preferred, falling back to `736x` then `564x`.

use serde::Deserialize;
use serde_json::json;

use crate::error::SourceError;
use crate::http::{ensure_success, parse_json};
use crate::retry::retry_with_backoff;
use crate::types::SocialImage;

use super::SocialClient;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    resource_response: Option<ResourceResponse>,
}

#[derive(Debug, Deserialize)]
struct ResourceResponse {
    #[serde(default)]
    data: Option<ResourceData>,
}

#[derive(Debug, Deserialize)]
struct ResourceData {
    #[serde(default)]
    results: Vec<Pin>,
}

#[derive(Debug, Deserialize)]
struct Pin {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    grid_title: Option<String>,
    #[serde(default)]
    images: Option<PinImages>,
    #[serde(default)]
    pinner: Option<Pinner>,
    #[serde(default)]
    aggregated_pin_data: Option<AggregatedPinData>,
}

#[derive(Debug, Deserialize)]
struct PinImages {
    #[serde(default)]
    orig: Option<PinImage>,
    #[serde(rename = "736x", default)]
    large: Option<PinImage>,
    #[serde(rename = "564x", default)]
    medium: Option<PinImage>,
}

#[derive(Debug, Deserialize)]
struct PinImage {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Pinner {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    profile_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AggregatedPinData {
    #[serde(default)]
    aggregated_stats: Option<AggregatedStats>,
}

#[derive(Debug, Deserialize)]
struct AggregatedStats {
    #[serde(default)]
    saves: Option<u64>,
}

impl Pin {
    /// Highest-quality image URL available on the pin.
    fn best_image_url(&self) -> Option<String> {
        let images = self.images.as_ref()?;
        [&images.orig, &images.large, &images.medium]
            .into_iter()
            .flatten()
            .find_map(|i| i.url.clone())
            .filter(|u| !u.is_empty())
    }

    fn into_social_image(self) -> Option<SocialImage> {
        let url = self.best_image_url()?;
        let title = self.title.clone().or_else(|| self.grid_title.clone());
        let (author, author_url) = self
            .pinner
            .map_or((None, None), |p| (p.username, p.profile_url));
        let popularity = self
            .aggregated_pin_data
            .and_then(|d| d.aggregated_stats)
            .and_then(|s| s.saves)
            .unwrap_or(0);
        let source_url = self
            .id
            .as_deref()
            .map(|id| format!("https://www.pinterest.com/pin/{id}/"));

        Some(SocialImage {
            url,
            platform: "Pinterest".to_string(),
            title,
            author,
            author_url,
            popularity,
            source_url,
        })
    }
}

pub(super) async fn fetch(
    client: &SocialClient,
    query: &str,
    count: usize,
) -> Result<Vec<SocialImage>, SourceError> {
    let url = format!(
        "{}/resource/BaseSearchResource/get/",
        client.pinterest_base_url
    );
    let options = json!({
        "options": { "query": query, "scope": "pins" },
        "context": {}
    })
    .to_string();
    let source_url_param = format!("/search/pins/?q={query}");

    let response = retry_with_backoff(
        client.settings.max_retries,
        client.settings.backoff_base_secs,
        || {
            let url = url.clone();
            let options = options.clone();
            let source_url_param = source_url_param.clone();
            async move {
                let response = client
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .query(&[("source_url", source_url_param), ("data", options)])
                    .send()
                    .await?;
                ensure_success("pinterest", &url, response)
            }
        },
    )
    .await?;

    let parsed: SearchResponse = parse_json("pinterest pin search", response).await?;

    let pins = parsed
        .resource_response
        .and_then(|r| r.data)
        .map(|d| d.results)
        .unwrap_or_default();

    Ok(pins
        .into_iter()
        .filter_map(Pin::into_social_image)
        .take(count)
        .collect())
}
