//! Handler trait and type erasure
//!
//! The route table stores handlers of different concrete types side by side,
//! so each one is kept behind `Arc<dyn ApiHandler>` and returns a boxed
//! future. Plain `async fn(Request) -> HandlerResult` items and closures
//! satisfy the trait through the blanket impl below.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::BoxError;
use crate::http::{Request, Response};

/// A heap-allocated, type-erased future.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// What an API handler produces: a complete response, or a fault the
/// dispatcher turns into a 500.
pub type HandlerResult = Result<Response, BoxError>;

/// A handler shared across concurrent requests.
pub type BoxedApiHandler = Arc<dyn ApiHandler>;

/// An external API handler.
///
/// The handler owns the request outright and is solely responsible for the
/// response; the dispatcher adds nothing to it.
pub trait ApiHandler: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture<HandlerResult>;
}

impl<F, Fut> ApiHandler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture<HandlerResult> {
        Box::pin((self)(req))
    }
}
