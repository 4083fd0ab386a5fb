//! Reddit image collector over the public JSON search API (no API key).
//!
//! Searches a fixed set of photography subreddits, keeps only posts whose
//! link is a direct image, and filters out meme/selfie-style titles.

use serde::Deserialize;

use crate::http::ensure_success;
use crate::http::parse_json;
use crate::retry::retry_with_backoff;
use crate::types::SocialImage;

use super::SocialClient;

/// Photography subreddits searched in order until `count` images are found.
const SEARCH_SUBREDDITS: &[&str] = &[
    "itookapicture",
    "travelphotography",
    "earthporn",
    "cityporn",
    "villageporn",
    "architectureporn",
];

/// Title substrings that disqualify a post (memes, selfies).
const EXCLUDED_TITLE_TERMS: &[&str] = &["meme", "funny", "joke", "selfie", "my face"];

const PAGE_LIMIT: usize = 25;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, Clone, Deserialize)]
struct PostData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    score: Option<i64>,
    #[serde(default)]
    permalink: Option<String>,
}

/// Returns `true` when a post URL points directly at an image.
///
/// Reddit search results mix image posts with text posts and external links;
/// only known image extensions and the two image-hosting domains the site
/// uses (`i.redd.it`, `i.imgur.com`) are accepted.
fn is_direct_image_url(url: &str) -> bool {
    const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];
    IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
        || url.contains("i.redd.it")
        || url.contains("i.imgur.com")
}

fn is_excluded_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    EXCLUDED_TITLE_TERMS.iter().any(|term| lower.contains(term))
}

fn to_social_image(post: PostData) -> Option<SocialImage> {
    let url = post.url.filter(|u| is_direct_image_url(u))?;

    if post.title.as_deref().is_some_and(is_excluded_title) {
        return None;
    }

    let author_url = post
        .author
        .as_deref()
        .map(|a| format!("https://reddit.com/u/{a}"));
    let source_url = post
        .permalink
        .as_deref()
        .map(|p| format!("https://reddit.com{p}"));

    Some(SocialImage {
        url,
        platform: "Reddit".to_string(),
        title: post.title,
        author: post.author,
        author_url,
        popularity: u64::try_from(post.score.unwrap_or(0)).unwrap_or(0),
        source_url,
    })
}

/// Searches the photography subreddits for direct-image posts matching
/// `query`, stopping once `count` images are collected.
///
/// Individual subreddit failures are logged and skipped so one flaky
/// subreddit search cannot lose the rest.
pub(super) async fn fetch(client: &SocialClient, query: &str, count: usize) -> Vec<SocialImage> {
    let mut images = Vec::new();

    for subreddit in SEARCH_SUBREDDITS {
        if images.len() >= count {
            break;
        }

        match search_subreddit(client, subreddit, query).await {
            Ok(listing) => {
                for post in listing.data.children {
                    if images.len() >= count {
                        break;
                    }
                    if let Some(image) = to_social_image(post.data) {
                        images.push(image);
                    }
                }
                tracing::debug!(
                    subreddit,
                    query,
                    total = images.len(),
                    "collected Reddit images"
                );
            }
            Err(e) => {
                tracing::warn!(subreddit, query, error = %e, "Reddit subreddit search failed");
            }
        }
    }

    images
}

async fn search_subreddit(
    client: &SocialClient,
    subreddit: &str,
    query: &str,
) -> Result<Listing, crate::error::SourceError> {
    let url = format!("{}/r/{subreddit}/search.json", client.reddit_base_url);
    let limit = PAGE_LIMIT.to_string();

    let response = retry_with_backoff(
        client.settings.max_retries,
        client.settings.backoff_base_secs,
        || {
            let url = url.clone();
            let limit = limit.clone();
            async move {
                let response = client
                    .client
                    .get(&url)
                    .query(&[
                        ("q", query),
                        ("restrict_sr", "1"),
                        ("sort", "top"),
                        ("limit", limit.as_str()),
                    ])
                    .send()
                    .await?;
                ensure_success("reddit", &url, response)
            }
        },
    )
    .await?;

    parse_json(&format!("reddit r/{subreddit} search"), response).await
}
