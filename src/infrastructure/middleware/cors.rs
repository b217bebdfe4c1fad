use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::infrastructure::repositories::API_KEY_HEADER;

pub const API_PREFIX: &str = "/api";

const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, xi-api-key";
const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// Answer every OPTIONS request under `/api` with 204 and permissive CORS headers.
///
/// Runs before routing, so paths without an OPTIONS handler are covered too.
pub async fn preflight_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS && is_api_path(request.uri().path()) {
        tracing::debug!(path = %request.uri().path(), "CORS preflight");
        return preflight_response();
    }

    next.run(request).await
}

/// CORS headers for non-preflight API responses
pub fn api_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
        .max_age(Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn is_api_path(path: &str) -> bool {
    path == API_PREFIX || path.starts_with("/api/")
}

fn preflight_response() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from(PREFLIGHT_MAX_AGE_SECS),
    );

    response
}
