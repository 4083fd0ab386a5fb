//! Wikimedia Commons file search provider.
//!
//! Uses the MediaWiki API with a search generator over the File namespace:
//! `GET /w/api.php?action=query&generator=search&gsrnamespace=6&...`.
//! The `pages` field is keyed by page id, so it deserializes into a map.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{ensure_success, parse_json};
use crate::retry::retry_with_backoff;

use super::GalleryClient;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<QueryBlock>,
}

#[derive(Debug, Deserialize)]
struct QueryBlock {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    /// Search rank within the result set; used to restore result order,
    /// since the `pages` map has no inherent ordering.
    #[serde(default)]
    index: Option<i64>,
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    #[serde(default)]
    url: Option<String>,
}

pub(super) async fn fetch(
    client: &GalleryClient,
    query: &str,
    count: usize,
) -> Result<Vec<String>, SourceError> {
    let url = format!("{}/w/api.php", client.wikimedia_base_url);
    let search = format!("filetype:bitmap {query}");
    let limit = count.to_string();

    let response = retry_with_backoff(
        client.settings.max_retries,
        client.settings.backoff_base_secs,
        || {
            let url = url.clone();
            let search = search.clone();
            let limit = limit.clone();
            async move {
                let response = client
                    .client
                    .get(&url)
                    .query(&[
                        ("action", "query"),
                        ("format", "json"),
                        ("generator", "search"),
                        ("gsrsearch", search.as_str()),
                        ("gsrnamespace", "6"),
                        ("gsrlimit", limit.as_str()),
                        ("prop", "imageinfo"),
                        ("iiprop", "url"),
                    ])
                    .send()
                    .await?;
                ensure_success("wikimedia", &url, response)
            }
        },
    )
    .await?;

    let parsed: ApiResponse = parse_json("wikimedia commons search", response).await?;

    let mut pages: Vec<Page> = parsed
        .query
        .map(|q| q.pages.into_values().collect())
        .unwrap_or_default();
    pages.sort_by_key(|p| p.index.unwrap_or(i64::MAX));

    Ok(pages
        .into_iter()
        .filter_map(|p| p.imageinfo.into_iter().next().and_then(|i| i.url))
        .filter(|u| !u.is_empty())
        .take(count)
        .collect())
}
