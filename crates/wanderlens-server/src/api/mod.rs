mod images;

use axum::{
    extract::Extension,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use wanderlens_aggregator::ImageAggregator;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<ImageAggregator>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    let limited_routes = Router::new()
        .route(
            "/api/v1/locations/images",
            post(images::fetch_location_images),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ));

    Router::new()
        .merge(public_routes)
        .merge(limited_routes)
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;
    use wanderlens_sources::{GalleryClient, HttpSettings, SocialClient};
    use wiremock::matchers::{method as http_method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_settings() -> HttpSettings {
        HttpSettings {
            timeout_secs: 5,
            user_agent: "wanderlens-test/0.1".to_string(),
            max_retries: 0,
            backoff_base_secs: 0,
        }
    }

    fn test_state(base_url: &str) -> AppState {
        let gallery = GalleryClient::new(test_settings(), base_url, base_url)
            .expect("failed to build test GalleryClient");
        let social = SocialClient::new(test_settings(), base_url, base_url, base_url)
            .expect("failed to build test SocialClient");
        AppState {
            aggregator: Arc::new(ImageAggregator::new(gallery, social, 30, 15)),
        }
    }

    /// Empty low-priority responses for every provider endpoint.
    async fn mount_empty_defaults(server: &MockServer) {
        Mock::given(http_method("GET"))
            .and(path("/v1/images/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .with_priority(10)
            .mount(server)
            .await;
        Mock::given(http_method("GET"))
            .and(path("/w/api.php"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"query": {"pages": {}}})),
            )
            .with_priority(10)
            .mount(server)
            .await;
        Mock::given(http_method("GET"))
            .and(path_regex(r"^/r/[^/]+/search\.json$"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"children": []}})),
            )
            .with_priority(10)
            .mount(server)
            .await;
        Mock::given(http_method("GET"))
            .and(path("/resource/BaseSearchResource/get/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"resource_response": {"data": {"results": []}}}),
            ))
            .with_priority(10)
            .mount(server)
            .await;
        Mock::given(http_method("GET"))
            .and(path("/services/feeds/photos_public.gne"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .with_priority(10)
            .mount(server)
            .await;
    }

    async fn mount_openverse(server: &MockServer, n: usize) {
        let results: Vec<serde_json::Value> = (0..n)
            .map(|i| json!({"url": format!("https://images.unsplash.com/photo-{i}.jpg")}))
            .collect();
        Mock::given(http_method("GET"))
            .and(path("/v1/images/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": results})))
            .mount(server)
            .await;
    }

    fn images_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/locations/images")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[tokio::test]
    async fn health_returns_ok_with_envelope() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server.uri()), default_rate_limit_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["data"]["status"].as_str(), Some("ok"));
        assert!(json["meta"]["requestId"].is_string());
    }

    #[tokio::test]
    async fn request_id_header_is_echoed_back() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server.uri()), default_rate_limit_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "trace-abc-123")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .map(|v| v.to_str().map_err(|e| e.to_string())),
            Some(Ok("trace-abc-123"))
        );
    }

    #[tokio::test]
    async fn missing_location_name_returns_validation_error() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server.uri()), default_rate_limit_state());

        let response = app
            .oneshot(images_request(json!({})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
    }

    #[tokio::test]
    async fn blank_location_name_returns_validation_error() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server.uri()), default_rate_limit_state());

        let response = app
            .oneshot(images_request(json!({"locationName": "   "})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fetch_location_images_returns_the_full_body_shape() {
        let server = MockServer::start().await;
        mount_empty_defaults(&server).await;
        mount_openverse(&server, 25).await;
        let app = build_app(test_state(&server.uri()), default_rate_limit_state());

        let response = app
            .oneshot(images_request(json!({"locationName": "Lisbon, Portugal"})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        let data = &json["data"];
        assert_eq!(data["page"].as_u64(), Some(1));
        assert_eq!(data["perPage"].as_u64(), Some(20));
        assert_eq!(data["total"].as_u64(), Some(25));
        assert_eq!(data["hasMore"].as_bool(), Some(true));
        assert_eq!(data["images"].as_array().map(Vec::len), Some(20));
        assert_eq!(data["sources"]["standard"].as_u64(), Some(25));
        assert_eq!(data["sources"]["social"].as_u64(), Some(0));
        assert_eq!(data["sources"]["total"].as_u64(), Some(25));
        assert_eq!(
            data["metadata"]["requestedLocation"].as_str(),
            Some("Lisbon, Portugal")
        );
        assert_eq!(data["metadata"]["hierarchyLevel"].as_u64(), Some(0));
        assert_eq!(data["metadata"]["fallbackUsed"].as_bool(), Some(false));
        // Trusted-host gallery image serialized in camelCase.
        let first = &data["images"][0];
        assert_eq!(first["source"].as_str(), Some("gallery"));
        assert_eq!(first["platform"].as_str(), Some("Unsplash"));
        assert!(first["score"].as_i64().is_some());
    }

    #[tokio::test]
    async fn second_page_returns_the_remainder() {
        let server = MockServer::start().await;
        mount_empty_defaults(&server).await;
        mount_openverse(&server, 25).await;
        let app = build_app(test_state(&server.uri()), default_rate_limit_state());

        let response = app
            .oneshot(images_request(
                json!({"locationName": "Lisbon, Portugal", "page": 2, "perPage": 20}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["data"]["images"].as_array().map(Vec::len), Some(5));
        assert_eq!(json["data"]["hasMore"].as_bool(), Some(false));
    }

    #[tokio::test]
    async fn per_page_is_clamped_to_the_allowed_range() {
        let server = MockServer::start().await;
        mount_empty_defaults(&server).await;
        mount_openverse(&server, 3).await;
        let app = build_app(test_state(&server.uri()), default_rate_limit_state());

        let response = app
            .oneshot(images_request(
                json!({"locationName": "Lisbon, Portugal", "perPage": 9999, "page": 0}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["data"]["perPage"].as_u64(), Some(100));
        assert_eq!(json["data"]["page"].as_u64(), Some(1));
    }

    #[tokio::test]
    async fn rate_limit_returns_429_after_the_window_fills() {
        let server = MockServer::start().await;
        mount_empty_defaults(&server).await;
        let app = build_app(
            test_state(&server.uri()),
            RateLimitState::new(2, Duration::from_secs(60)),
        );

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(images_request(json!({"locationName": "Lisbon"})))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(images_request(json!({"locationName": "Lisbon"})))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "mystery", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
