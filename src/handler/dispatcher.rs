//! Request dispatch module
//!
//! Entry point for every request: CORS preflight, then the route table, then
//! the SPA fallback. API handlers run behind a per-request failure boundary.

use std::sync::Arc;
use std::time::Duration;

use hyper::Method;
use tokio::task::AbortHandle;

use crate::api::{ApiDomain, BoxedApiHandler};
use crate::handler::spa::SpaServer;
use crate::handler::uploads::UploadsServer;
use crate::http::{self, Request, Response};
use crate::logger;
use crate::routing::{RouteTable, RouteTarget};

/// Routes requests to uploads, API handlers or the front-end build.
///
/// Immutable once built; share it between connections with an `Arc`.
#[derive(Debug)]
pub struct Dispatcher {
    routes: RouteTable,
    uploads: UploadsServer,
    spa: SpaServer,
    handler_timeout: Duration,
}

impl Dispatcher {
    pub const fn new(
        routes: RouteTable,
        uploads: UploadsServer,
        spa: SpaServer,
        handler_timeout: Duration,
    ) -> Self {
        Self {
            routes,
            uploads,
            spa,
            handler_timeout,
        }
    }

    /// Produce the response for one request. Never fails.
    pub async fn dispatch(&self, req: Request) -> Response {
        let url = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.uri().path(), |pq| pq.as_str());
        logger::log_request(req.method(), url);

        if req.method() == Method::OPTIONS {
            return http::build_preflight_response();
        }

        let path = req.uri().path();
        match self.routes.match_route(path).map(|route| &route.target) {
            Some(RouteTarget::Uploads) => self.uploads.serve(path).await,
            Some(RouteTarget::Api { domain, handler }) => {
                let (domain, handler) = (*domain, Arc::clone(handler));
                run_guarded(domain, handler, req, self.handler_timeout).await
            }
            None => self.spa.serve(path).await,
        }
    }
}

/// Aborts the handler task when the request future goes away, whether it
/// finished, timed out or was dropped by a closed connection.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run an API handler in its own task so an error, a panic or a stall is
/// confined to this request.
///
/// - `Err` from the handler or a panic: 500
/// - no response within `timeout`: task aborted, 503
/// - request dropped before completion: task aborted
async fn run_guarded(
    domain: ApiDomain,
    handler: BoxedApiHandler,
    req: Request,
    timeout: Duration,
) -> Response {
    let task = tokio::spawn(handler.call(req));
    let _guard = AbortOnDrop(task.abort_handle());

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(response))) => response,
        Ok(Ok(Err(err))) => {
            logger::log_handler_fault(domain.name(), &err);
            http::build_500_response()
        }
        Ok(Err(join_err)) => {
            let fault = if join_err.is_panic() {
                "handler panicked"
            } else {
                "handler task cancelled"
            };
            logger::log_handler_fault(domain.name(), &fault);
            http::build_500_response()
        }
        Err(_) => {
            logger::log_warning(&format!(
                "[{domain}] handler timed out after {}s",
                timeout.as_secs_f32()
            ));
            http::build_503_response()
        }
    }
}
