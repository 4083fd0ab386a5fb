//! Normalized image shapes returned by the source adapters.
//!
//! Upstream providers return wildly different JSON; everything is validated
//! and flattened at the adapter boundary so the aggregator never sees a raw
//! provider payload.

/// A community-sourced image with its upstream popularity metric.
///
/// `popularity` is the raw number the platform exposes (Reddit upvotes,
/// Pinterest saves); the Flickr public feed has no such metric and reports 0.
/// Scoring into a bounded band happens in the aggregator, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialImage {
    /// Direct image URL. Unique key for downstream deduplication.
    pub url: String,
    /// Platform label (`"Reddit"`, `"Pinterest"`, `"Flickr"`).
    pub platform: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    /// Raw upstream popularity metric (upvotes, saves). 0 when the platform
    /// exposes none.
    pub popularity: u64,
    /// Canonical page the image was found on (post permalink, pin page).
    pub source_url: Option<String>,
}
