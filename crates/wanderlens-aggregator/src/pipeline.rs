//! Aggregation pipeline: broaden the location query level by level until
//! enough images are found, then score, merge, and deduplicate.

use wanderlens_core::AppConfig;
use wanderlens_sources::{GalleryClient, HttpSettings, SocialClient, SourceError};

use crate::hierarchy::expand_hierarchy;
use crate::scoring::rank_images;
use crate::types::AggregateOutcome;

/// Orchestrates the two adapter families across hierarchy levels.
///
/// Built once at startup and shared across requests; holds no per-request
/// state. Both families fail soft internally, so aggregation itself is
/// infallible — the worst case is an empty result list.
pub struct ImageAggregator {
    gallery: GalleryClient,
    social: SocialClient,
    /// Images requested from each family per level.
    images_per_source: usize,
    /// Combined count below which the next, broader level is tried.
    min_images_threshold: usize,
}

impl ImageAggregator {
    #[must_use]
    pub fn new(
        gallery: GalleryClient,
        social: SocialClient,
        images_per_source: usize,
        min_images_threshold: usize,
    ) -> Self {
        Self {
            gallery,
            social,
            images_per_source,
            min_images_threshold,
        }
    }

    /// Builds the aggregator and both adapter clients from the application
    /// config.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if a `reqwest::Client` cannot be
    /// constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SourceError> {
        let settings = HttpSettings::from_app_config(config);
        let urls = &config.provider_urls;
        let gallery = GalleryClient::new(settings.clone(), &urls.openverse, &urls.wikimedia)?;
        let social = SocialClient::new(settings, &urls.reddit, &urls.pinterest, &urls.flickr)?;
        Ok(Self::new(
            gallery,
            social,
            config.images_per_source,
            config.min_images_threshold,
        ))
    }

    /// Runs the aggregation for one location request.
    ///
    /// At each hierarchy level both families are queried concurrently. The
    /// level is accepted when the combined count reaches the threshold, or
    /// unconditionally at the last (broadest) level — low image counts are
    /// a fallback signal, never an error.
    pub async fn aggregate(&self, location_name: &str, include_social: bool) -> AggregateOutcome {
        let levels = expand_hierarchy(location_name);
        let last_level = levels.len() - 1;

        for (level, query) in levels.iter().enumerate() {
            let (gallery_urls, social_images) = if include_social {
                tokio::join!(
                    self.gallery
                        .fetch_location_gallery(query, self.images_per_source),
                    self.social.fetch_social_images(query, self.images_per_source),
                )
            } else {
                (
                    self.gallery
                        .fetch_location_gallery(query, self.images_per_source)
                        .await,
                    Vec::new(),
                )
            };

            let standard_count = gallery_urls.len();
            let social_count = social_images.len();
            let total = standard_count + social_count;

            if total >= self.min_images_threshold || level == last_level {
                tracing::debug!(
                    requested = location_name,
                    used = query.as_str(),
                    level,
                    standard_count,
                    social_count,
                    "accepted hierarchy level"
                );
                return AggregateOutcome {
                    images: rank_images(gallery_urls, social_images),
                    requested_location: location_name.to_owned(),
                    used_location: query.clone(),
                    hierarchy_level: level,
                    fallback_used: level > 0,
                    standard_count,
                    social_count,
                };
            }

            tracing::debug!(
                requested = location_name,
                query = query.as_str(),
                level,
                total,
                threshold = self.min_images_threshold,
                "too few images — broadening location query"
            );
        }

        // expand_hierarchy always returns at least one level and the last
        // level is accepted unconditionally above.
        unreachable!("hierarchy expansion produced no levels")
    }
}
