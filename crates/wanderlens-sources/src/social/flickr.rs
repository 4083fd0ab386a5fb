//! Flickr image collector over the public photo feed (no API key).
//!
//! `GET /services/feeds/photos_public.gne?tags=<query>&format=json&nojsoncallback=1`.
//! The feed only exposes a medium-size URL; swapping the `_m` suffix for `_b`
//! yields the large rendition. Authors come back as
//! `"nobody@flickr.com (username)"`, so the username is extracted from the
//! parentheses. The feed carries no popularity metric.

use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{ensure_success, parse_json};
use crate::retry::retry_with_backoff;
use crate::types::SocialImage;

use super::SocialClient;

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    media: Option<Media>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Media {
    #[serde(default)]
    m: Option<String>,
}

/// Extracts the username from Flickr's `"nobody@flickr.com (username)"` form.
/// Returns the input unchanged when the parentheses are absent.
fn parse_author(raw: &str) -> String {
    raw.split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map_or_else(|| raw.to_owned(), |(name, _)| name.to_owned())
}

fn to_social_image(item: FeedItem) -> Option<SocialImage> {
    let medium_url = item.media.and_then(|m| m.m).filter(|u| !u.is_empty())?;
    // _m = medium, _b = large.
    let url = medium_url.replace("_m.jpg", "_b.jpg");

    Some(SocialImage {
        url,
        platform: "Flickr".to_string(),
        title: item.title,
        author: item.author.as_deref().map(parse_author),
        author_url: None,
        popularity: 0,
        source_url: item.link,
    })
}

pub(super) async fn fetch(
    client: &SocialClient,
    query: &str,
    count: usize,
) -> Result<Vec<SocialImage>, SourceError> {
    let url = format!(
        "{}/services/feeds/photos_public.gne",
        client.flickr_base_url
    );

    let response = retry_with_backoff(
        client.settings.max_retries,
        client.settings.backoff_base_secs,
        || {
            let url = url.clone();
            async move {
                let response = client
                    .client
                    .get(&url)
                    .query(&[("tags", query), ("format", "json"), ("nojsoncallback", "1")])
                    .send()
                    .await?;
                ensure_success("flickr", &url, response)
            }
        },
    )
    .await?;

    let parsed: Feed = parse_json("flickr public feed", response).await?;

    Ok(parsed
        .items
        .into_iter()
        .filter_map(to_social_image)
        .take(count)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_author_extracts_username_from_parentheses() {
        assert_eq!(parse_author("nobody@flickr.com (steppe_light)"), "steppe_light");
    }

    #[test]
    fn parse_author_passes_through_plain_names() {
        assert_eq!(parse_author("steppe_light"), "steppe_light");
    }

    #[test]
    fn upgrades_medium_url_to_large() {
        let item = FeedItem {
            title: Some("Jizzakh steppe".to_string()),
            media: Some(Media {
                m: Some("https://live.staticflickr.com/1/2_m.jpg".to_string()),
            }),
            author: Some("nobody@flickr.com (steppe_light)".to_string()),
            link: Some("https://www.flickr.com/photos/steppe_light/2/".to_string()),
        };
        let image = to_social_image(item).expect("image");
        assert_eq!(image.url, "https://live.staticflickr.com/1/2_b.jpg");
        assert_eq!(image.author.as_deref(), Some("steppe_light"));
        assert_eq!(image.popularity, 0);
    }

    #[test]
    fn item_without_media_url_is_dropped() {
        let item = FeedItem {
            title: None,
            media: None,
            author: None,
            link: None,
        };
        assert!(to_social_image(item).is_none());
    }
}
