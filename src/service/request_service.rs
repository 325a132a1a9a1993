use crate::response::ResponseBuffer;
use crate::router::Router;
use crate::types::RemoteAddr;
use bytes::Bytes;
use http_body_util::Full;
use hyper::service::Service;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::fmt::{self, Debug, Formatter};
use std::future::{ready, Ready};
use std::net::SocketAddr;
use std::sync::Arc;

/// A hyper [`Service`] that drives a [`Router`] for one connection.
///
/// Each call stamps the peer address (when one is known) into the request
/// extensions, runs the router to completion against a fresh
/// [`ResponseBuffer`], and resolves immediately with the buffered response.
/// The chain protocol has no error channel, so the service error type is
/// [`Infallible`]; a step that panics is not caught here and propagates to
/// whatever supervises the connection task.
pub struct RequestService<B> {
    pub(crate) router: Arc<Router<B>>,
    pub(crate) remote_addr: Option<SocketAddr>,
}

impl<B> Service<Request<B>> for RequestService<B> {
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, mut req: Request<B>) -> Self::Future {
        if let Some(addr) = self.remote_addr {
            req.extensions_mut().insert(RemoteAddr(addr));
        }

        let mut res = ResponseBuffer::new();
        self.router.serve(&mut res, req);

        ready(Ok(res.into_response()))
    }
}

impl<B> Debug for RequestService<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RequestService {{ router: {:?}, remote_addr: {:?} }}",
            self.router, self.remote_addr
        )
    }
}

/// Wraps a [`Router`] in an [`Arc`] once so per-connection
/// [`RequestService`]s can be handed out cheaply.
pub struct RequestServiceBuilder<B> {
    router: Arc<Router<B>>,
}

impl<B> RequestServiceBuilder<B> {
    pub fn new(router: Router<B>) -> RequestServiceBuilder<B> {
        RequestServiceBuilder {
            router: Arc::new(router),
        }
    }

    pub fn build(&self, remote_addr: Option<SocketAddr>) -> RequestService<B> {
        RequestService {
            router: self.router.clone(),
            remote_addr,
        }
    }
}

impl<B> Debug for RequestServiceBuilder<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "RequestServiceBuilder {{ router: {:?} }}", self.router)
    }
}
