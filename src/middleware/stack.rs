//! Ordered middleware composition around a terminal endpoint.
//!
//! A [`Stack`] holds an ordered list of [`Middleware`] and one [`Endpoint`]. Running
//! it hands the request to the first middleware, which receives a [`Next`] for the
//! rest of the chain. The first middleware added therefore sees the request first and
//! the response last. A stack with no middleware calls the endpoint directly.
//!
//! ```text
//! Stack::new(router)
//!     .with(LogRequests)          // outermost
//!     .with(ClassifySession)
//!     .with(RequireSession)       // innermost
//! ```

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Router;
use axum::extract::Request;
use axum::response::Response;
use tower::{Service, ServiceExt};

/// Heap-allocated future returned by middleware and endpoints.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One "process and delegate" stage.
pub trait Middleware: Send + Sync + 'static {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Response>;
}

/// The terminal handler of a stack.
pub trait Endpoint: Send + Sync + 'static {
    fn serve(&self, req: Request) -> BoxFuture<'_, Response>;
}

impl Endpoint for Router {
    fn serve(&self, req: Request) -> BoxFuture<'_, Response> {
        let router = self.clone();
        Box::pin(async move {
            match router.oneshot(req).await {
                Ok(response) => response,
                Err(never) => match never {},
            }
        })
    }
}

/// Adapts an async function into an [`Endpoint`].
pub struct FnEndpoint<F>(pub F);

impl<F, Fut> Endpoint for FnEndpoint<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn serve(&self, req: Request) -> BoxFuture<'_, Response> {
        Box::pin((self.0)(req))
    }
}

/// The remainder of the chain after the current middleware.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    rest: &'a [Arc<dyn Middleware>],
    endpoint: &'a dyn Endpoint,
}

impl<'a> Next<'a> {
    pub fn run(self, req: Request) -> BoxFuture<'a, Response> {
        match self.rest.split_first() {
            Some((head, tail)) => head.handle(
                req,
                Next {
                    rest: tail,
                    endpoint: self.endpoint,
                },
            ),
            None => self.endpoint.serve(req),
        }
    }
}

#[derive(Clone)]
pub struct Stack {
    layers: Vec<Arc<dyn Middleware>>,
    endpoint: Arc<dyn Endpoint>,
}

impl Stack {
    pub fn new(endpoint: impl Endpoint) -> Self {
        Self {
            layers: Vec::new(),
            endpoint: Arc::new(endpoint),
        }
    }

    /// Appends `middleware` inside every stage added before it.
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn run(&self, req: Request) -> BoxFuture<'_, Response> {
        Next {
            rest: &self.layers,
            endpoint: self.endpoint.as_ref(),
        }
        .run(req)
    }
}

impl Endpoint for Stack {
    fn serve(&self, req: Request) -> BoxFuture<'_, Response> {
        self.run(req)
    }
}

impl Service<Request> for Stack {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let stack = self.clone();
        Box::pin(async move { Ok(stack.run(req).await) })
    }
}
