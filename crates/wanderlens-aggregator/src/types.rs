use serde::Serialize;

/// Which adapter family an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Gallery,
    Social,
}

/// A scored, normalized image ready for ranking and pagination.
///
/// Lives only for the duration of one request; never persisted. `url` is the
/// unique key for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredImage {
    pub url: String,
    pub source: ImageSource,
    /// Platform label, derived from the URL host for gallery images and
    /// reported by the adapter for social images.
    pub platform: String,
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Result of one aggregation run, including which hierarchy level satisfied
/// the request (caller transparency for debugging fallback behavior).
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    /// Scored, sorted (descending), URL-deduplicated images.
    pub images: Vec<ScoredImage>,
    pub requested_location: String,
    /// The hierarchy fragment actually queried for the accepted level.
    pub used_location: String,
    /// Index of the accepted level; 0 means the full location string.
    pub hierarchy_level: usize,
    pub fallback_used: bool,
    /// Pre-dedup image count from the standard gallery family.
    pub standard_count: usize,
    /// Pre-dedup image count from the social family.
    pub social_count: usize,
}
