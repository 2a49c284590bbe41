//! # frontdoor
//!
//! Front-door request dispatcher for a web application server.
//!
//! Every request is classified by method and URL prefix:
//!
//! | Request | Goes to |
//! |---|---|
//! | `OPTIONS *` | CORS preflight, answered immediately |
//! | `/uploads/*` | uploaded images, served from the uploads directory |
//! | `/api/<domain>*` | the registered [`api::ApiHandler`] for that domain |
//! | anything else | the front-end build, with `index.html` fallback |
//!
//! API handlers and the data store are supplied by the embedding application
//! through [`api::ApiHandlers`] and [`api::DataStore`].
//!
//! ```rust,no_run
//! use frontdoor::api::{ApiDomain, ApiHandlers, HandlerResult};
//! use frontdoor::config::Config;
//! use frontdoor::http::{self, Request};
//!
//! async fn welcome(_req: Request) -> HandlerResult {
//!     let body = serde_json::json!({ "message": "welcome" });
//!     Ok(http::build_json_response(hyper::StatusCode::OK, &body))
//! }
//!
//! let config = Config::load().unwrap();
//! let handlers = ApiHandlers::new().register(ApiDomain::Welcome, welcome);
//! let dispatcher = frontdoor::build_dispatcher(&config, handlers);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;

use crate::api::ApiHandlers;
use crate::config::Config;
use crate::handler::{Dispatcher, SpaServer, UploadsServer};
use crate::routing::RouteTable;

/// Assemble the dispatcher described by `config` around `handlers`.
pub fn build_dispatcher(config: &Config, handlers: ApiHandlers) -> Dispatcher {
    Dispatcher::new(
        RouteTable::standard(handlers),
        UploadsServer::new(&config.paths.uploads_dir),
        SpaServer::new(&config.paths.public_dir),
        config.handler_timeout(),
    )
}
