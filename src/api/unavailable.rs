//! Placeholder for API domains with no handler wired in

use hyper::StatusCode;
use serde_json::json;

use super::domain::ApiDomain;
use super::handler::{ApiHandler, BoxFuture, HandlerResult};
use crate::http::{self, Request};

/// Answers every request with `501 Not Implemented` and a JSON error body.
#[derive(Debug, Clone, Copy)]
pub struct NotImplemented {
    domain: ApiDomain,
}

impl NotImplemented {
    pub const fn new(domain: ApiDomain) -> Self {
        Self { domain }
    }
}

impl ApiHandler for NotImplemented {
    fn call(&self, _req: Request) -> BoxFuture<HandlerResult> {
        let body = json!({
            "error": "not_implemented",
            "domain": self.domain.name(),
        });
        Box::pin(async move { Ok(http::build_json_response(StatusCode::NOT_IMPLEMENTED, &body)) })
    }
}
