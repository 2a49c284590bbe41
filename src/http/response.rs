//! HTTP response building module
//!
//! Builders for every response the dispatcher itself produces. API handlers
//! build their own responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

pub const CORS_ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const CORS_ALLOWED_HEADERS: &str = "Content-Type";

/// Body of the generic 404 for missing static files.
pub const NOT_FOUND_BODY: &str = "<h1>404 - File Not Found</h1>";

/// Body of the 404 returned when the front-end build itself is missing.
pub const BUILD_MISSING_BODY: &str = "<h1>404 - Application Not Found</h1>\
<p>The React app build files are missing. \
Please run \"npm run build\" in the client directory.</p>";

pub const INTERNAL_ERROR_BODY: &str = "<h1>500 - Internal Server Error</h1>";
pub const TIMEOUT_BODY: &str = "<h1>503 - Service Unavailable</h1><p>The request took too long to process.</p>";

/// Build 200 response carrying a static asset
pub fn build_asset_response(data: Bytes, content_type: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(ALLOW_ORIGIN, "*")
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            fallback_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
        })
}

/// Build CORS preflight response (OPTIONS)
pub fn build_preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(ALLOW_ORIGIN, "*")
        .header(ALLOW_METHODS, CORS_ALLOWED_METHODS)
        .header(ALLOW_HEADERS, CORS_ALLOWED_HEADERS)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build generic 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_html_error(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Build 404 response for a missing front-end build
pub fn build_build_missing_response() -> Response<Full<Bytes>> {
    build_html_error(StatusCode::NOT_FOUND, BUILD_MISSING_BODY)
}

/// Build 500 response for a failed API handler
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_html_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
}

/// Build 503 response for an API handler that exceeded its time budget
pub fn build_503_response() -> Response<Full<Bytes>> {
    build_html_error(StatusCode::SERVICE_UNAVAILABLE, TIMEOUT_BODY)
}

/// Build a JSON response with the given status
pub fn build_json_response(status: StatusCode, body: &serde_json::Value) -> Response<Full<Bytes>> {
    let payload = Bytes::from(body.to_string());
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(ALLOW_ORIGIN, "*")
        .body(Full::new(payload))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
        })
}

fn build_html_error(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/html")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback_response(status, body)
        })
}

/// Response assembled without the builder, used when the builder fails
fn fallback_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
    resp
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
