//! HTTP protocol layer module
//!
//! Content-Type detection and response builders, decoupled from routing.

pub mod mime;
pub mod response;

use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;

// Re-export commonly used types
pub use mime::MimeTable;
pub use response::{
    build_404_response, build_500_response, build_503_response, build_asset_response,
    build_build_missing_response, build_json_response, build_preflight_response,
};

/// Type-erased request body handed to API handlers untouched.
pub type Body = UnsyncBoxBody<Bytes, hyper::Error>;

/// Request type seen by the dispatcher and API handlers.
pub type Request = hyper::Request<Body>;

/// Response type produced by every component.
pub type Response = hyper::Response<Full<Bytes>>;

/// Wrap an in-memory payload as a request [`Body`].
pub fn full_body(data: impl Into<Bytes>) -> Body {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed_unsync()
}
