//! POST /api/v1/locations/images — the location image search endpoint.

use axum::{
    extract::{Extension, State},
    Json,
};
use serde::{Deserialize, Serialize};

use wanderlens_aggregator::{page_window, ScoredImage};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

const DEFAULT_PER_PAGE: usize = 20;
const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LocationImagesRequest {
    location_name: Option<String>,
    page: Option<usize>,
    per_page: Option<usize>,
    include_social: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LocationImagesData {
    images: Vec<ScoredImage>,
    page: usize,
    per_page: usize,
    total: usize,
    has_more: bool,
    sources: SourceCounts,
    metadata: SearchMetadata,
}

/// Pre-dedup counts per adapter family, for caller-side diagnostics.
#[derive(Debug, Serialize)]
pub(super) struct SourceCounts {
    standard: usize,
    social: usize,
    total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchMetadata {
    requested_location: String,
    used_location: String,
    hierarchy_level: usize,
    fallback_used: bool,
}

pub(super) async fn fetch_location_images(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(payload): Json<LocationImagesRequest>,
) -> Result<Json<ApiResponse<LocationImagesData>>, ApiError> {
    let location_name = match payload.location_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                "locationName is required",
            ));
        }
    };

    let page = payload.page.unwrap_or(1).max(1);
    let per_page = payload
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let include_social = payload.include_social.unwrap_or(true);

    let outcome = state
        .aggregator
        .aggregate(&location_name, include_social)
        .await;

    let total = outcome.images.len();
    let window = page_window(total, page, per_page);
    let images = outcome.images[window.start..window.end].to_vec();

    tracing::info!(
        location = %location_name,
        level = outcome.hierarchy_level,
        total,
        page,
        "served location image search"
    );

    Ok(Json(ApiResponse {
        data: LocationImagesData {
            images,
            page,
            per_page,
            total,
            has_more: window.has_more,
            sources: SourceCounts {
                standard: outcome.standard_count,
                social: outcome.social_count,
                total: outcome.standard_count + outcome.social_count,
            },
            metadata: SearchMetadata {
                requested_location: outcome.requested_location,
                used_location: outcome.used_location,
                hierarchy_level: outcome.hierarchy_level,
                fallback_used: outcome.fallback_used,
            },
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
