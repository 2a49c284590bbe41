//! API domain seams
//!
//! The API handlers and the data store live outside this crate. This module
//! names the domains, defines the traits they plug in through, and provides
//! placeholder implementations for running the dispatcher on its own.

mod domain;
mod handler;
mod store;
mod unavailable;

pub use domain::ApiDomain;
pub use handler::{ApiHandler, BoxFuture, BoxedApiHandler, HandlerResult};
pub use store::{init_data_store, DataStore, NoopStore};
pub use unavailable::NotImplemented;

use std::collections::HashMap;
use std::sync::Arc;

/// One handler per API domain, assembled at startup.
///
/// Domains without a registered handler answer with [`NotImplemented`].
#[derive(Default)]
pub struct ApiHandlers {
    handlers: HashMap<ApiDomain, BoxedApiHandler>,
}

impl ApiHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `domain`, replacing any previous one.
    #[must_use]
    pub fn register(mut self, domain: ApiDomain, handler: impl ApiHandler) -> Self {
        self.handlers.insert(domain, Arc::new(handler));
        self
    }

    /// Take the handler for `domain`, falling back to [`NotImplemented`].
    pub fn take(&mut self, domain: ApiDomain) -> BoxedApiHandler {
        self.handlers
            .remove(&domain)
            .unwrap_or_else(|| Arc::new(NotImplemented::new(domain)))
    }
}
