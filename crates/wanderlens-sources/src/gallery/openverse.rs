//! Openverse image search provider.
//!
//! Keyless public API: `GET /v1/images/?q=<query>&page_size=<n>`.
//! Only the direct image URL is consumed; everything else in the (large)
//! result objects is ignored.

use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{ensure_success, parse_json};
use crate::retry::retry_with_backoff;

use super::GalleryClient;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    url: Option<String>,
}

pub(super) async fn fetch(
    client: &GalleryClient,
    query: &str,
    count: usize,
) -> Result<Vec<String>, SourceError> {
    let url = format!("{}/v1/images/", client.openverse_base_url);
    let page_size = count.to_string();

    let response = retry_with_backoff(
        client.settings.max_retries,
        client.settings.backoff_base_secs,
        || {
            let url = url.clone();
            let page_size = page_size.clone();
            async move {
                let response = client
                    .client
                    .get(&url)
                    .query(&[("q", query), ("page_size", page_size.as_str())])
                    .send()
                    .await?;
                ensure_success("openverse", &url, response)
            }
        },
    )
    .await?;

    let parsed: SearchResponse = parse_json("openverse image search", response).await?;

    Ok(parsed
        .results
        .into_iter()
        .filter_map(|r| r.url)
        .filter(|u| !u.is_empty())
        .take(count)
        .collect())
}
