//! Route table module
//!
//! An ordered list of literal prefixes, each bound to a target. Lookup walks
//! the list and returns the first prefix the path starts with.

use std::fmt;

use crate::api::{ApiDomain, ApiHandlers, BoxedApiHandler};
use crate::handler::uploads::UPLOADS_PREFIX;

/// What a matched prefix dispatches to
#[derive(Clone)]
pub enum RouteTarget {
    /// The uploaded-file server
    Uploads,
    /// An external API handler
    Api {
        domain: ApiDomain,
        handler: BoxedApiHandler,
    },
}

impl fmt::Debug for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploads => f.write_str("Uploads"),
            Self::Api { domain, .. } => f.debug_tuple("Api").field(domain).finish(),
        }
    }
}

/// A single prefix rule
#[derive(Debug, Clone)]
pub struct Route {
    pub prefix: &'static str,
    pub target: RouteTarget,
}

/// Ordered, immutable routing rules. Anything unmatched belongs to the SPA.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The dispatcher's fixed table: uploads first, then every API domain in
    /// [`ApiDomain::ALL`] order.
    pub fn standard(mut handlers: ApiHandlers) -> Self {
        let mut routes = Vec::with_capacity(ApiDomain::ALL.len() + 1);
        routes.push(Route {
            prefix: UPLOADS_PREFIX,
            target: RouteTarget::Uploads,
        });
        routes.extend(ApiDomain::ALL.into_iter().map(|domain| Route {
            prefix: domain.prefix(),
            target: RouteTarget::Api {
                domain,
                handler: handlers.take(domain),
            },
        }));
        Self { routes }
    }

    /// Find the first route whose prefix starts `path`
    pub fn match_route(&self, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| path.starts_with(route.prefix))
    }

    /// Prefixes in evaluation order
    pub fn prefixes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.iter().map(|r| r.prefix)
    }
}
