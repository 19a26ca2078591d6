use crate::error::Result;
use crate::request::{Request, Response};
use async_trait::async_trait;
use std::future::Future;

/// Processes one command routed to it by the [`Shell`](crate::Shell).
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn handle(&self, req: Request) -> Result<Response>;
}

/// A [`Handler`] backed by an async closure. Built with [`handler_fn`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wraps an async closure into a [`Handler`].
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    HandlerFn { f }
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    async fn handle(&self, req: Request) -> Result<Response> {
        (self.f)(req).await
    }
}
