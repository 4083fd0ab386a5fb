//! Scoring, merging, and deduplication of heterogeneous image results.
//!
//! Gallery images are scored positionally with a flat bonus for trusted
//! stock platforms; social images get a tiered mapping from their upstream
//! popularity metric into bounded bands. Social scores are deliberately
//! biased higher (floor 50, vs. gallery which can reach 0) to prefer
//! community-sourced photos.

use std::collections::HashSet;

use wanderlens_sources::SocialImage;

use crate::types::{ImageSource, ScoredImage};

/// Flat score bonus for gallery images hosted on a trusted stock platform.
const TRUSTED_PLATFORM_BONUS: i32 = 10;

/// Social scores never drop below this floor regardless of band or position.
const SOCIAL_SCORE_FLOOR: i32 = 50;

/// URL-substring to platform-label mapping, most specific first.
const PLATFORM_PATTERNS: &[(&str, &str)] = &[
    ("unsplash", "Unsplash"),
    ("pexels", "Pexels"),
    ("pixabay", "Pixabay"),
    ("wikimedia", "Wikimedia"),
    ("wikipedia", "Wikimedia"),
    ("staticflickr", "Flickr"),
    ("flickr", "Flickr"),
    ("redd.it", "Reddit"),
    ("imgur", "Reddit"),
    ("pinimg", "Pinterest"),
    ("pinterest", "Pinterest"),
];

/// Stock platforms whose gallery results get [`TRUSTED_PLATFORM_BONUS`].
const TRUSTED_PLATFORMS: &[&str] = &["Unsplash", "Pexels", "Pixabay", "Wikimedia"];

/// Derives a platform label by substring-matching the URL.
///
/// Unrecognized hosts map to `"Web"`.
#[must_use]
pub fn platform_from_url(url: &str) -> &'static str {
    let lower = url.to_lowercase();
    PLATFORM_PATTERNS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map_or("Web", |(_, label)| label)
}

fn is_trusted_platform(platform: &str) -> bool {
    TRUSTED_PLATFORMS.contains(&platform)
}

/// Popularity bands for social images. Each band has a base score; an
/// image's position within its band is subtracted from the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopularityBand {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl PopularityBand {
    fn for_popularity(popularity: u64) -> Self {
        match popularity {
            1000.. => Self::VeryHigh,
            500.. => Self::High,
            100.. => Self::Medium,
            10.. => Self::Low,
            _ => Self::VeryLow,
        }
    }

    fn base_score(self) -> i32 {
        match self {
            Self::VeryHigh => 100,
            Self::High => 90,
            Self::Medium => 80,
            Self::Low => 65,
            Self::VeryLow => 55,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::VeryHigh => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::VeryLow => 4,
        }
    }
}

/// Scores one gallery image by list position. Range [0, 110]: the positional
/// component floors at 0 before the trusted bonus is added.
fn gallery_score(position: usize, platform: &str) -> i32 {
    let positional = i32::try_from(position).map_or(0, |p| (100 - p).max(0));
    let bonus = if is_trusted_platform(platform) {
        TRUSTED_PLATFORM_BONUS
    } else {
        0
    };
    positional + bonus
}

/// Scores gallery URLs positionally, deriving the platform from each URL.
#[must_use]
pub fn score_gallery_images(urls: Vec<String>) -> Vec<ScoredImage> {
    urls.into_iter()
        .enumerate()
        .map(|(position, url)| {
            let platform = platform_from_url(&url);
            ScoredImage {
                score: gallery_score(position, platform),
                url,
                source: ImageSource::Gallery,
                platform: platform.to_owned(),
                author: None,
                title: None,
                source_url: None,
            }
        })
        .collect()
}

/// Scores social images via popularity bands, offsetting each image by its
/// position within its own band and flooring at [`SOCIAL_SCORE_FLOOR`].
#[must_use]
pub fn score_social_images(images: Vec<SocialImage>) -> Vec<ScoredImage> {
    let mut band_positions = [0usize; 5];

    images
        .into_iter()
        .map(|image| {
            let band = PopularityBand::for_popularity(image.popularity);
            let position = band_positions[band.index()];
            band_positions[band.index()] += 1;

            let offset = i32::try_from(position).unwrap_or(i32::MAX);
            let score = (band.base_score().saturating_sub(offset)).max(SOCIAL_SCORE_FLOOR);

            ScoredImage {
                url: image.url,
                source: ImageSource::Social,
                platform: image.platform,
                score,
                author: image.author,
                title: image.title,
                source_url: image.source_url,
            }
        })
        .collect()
}

/// Scores both families, merges (gallery first), sorts descending by score
/// (stable — ties keep merge order), and deduplicates by exact URL keeping
/// the first occurrence. Because the sort happens before the dedup, the
/// highest-scored duplicate survives.
#[must_use]
pub fn rank_images(gallery_urls: Vec<String>, social_images: Vec<SocialImage>) -> Vec<ScoredImage> {
    let mut images = score_gallery_images(gallery_urls);
    images.extend(score_social_images(social_images));

    images.sort_by(|a, b| b.score.cmp(&a.score));

    let mut seen_urls: HashSet<String> = HashSet::new();
    images.retain(|image| seen_urls.insert(image.url.clone()));

    images
}
