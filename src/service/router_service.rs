use crate::router::Router;
use crate::service::request_service::{RequestService, RequestServiceBuilder};
use hyper::service::Service;
use std::convert::Infallible;
use std::fmt::{self, Debug, Formatter};
use std::future::{ready, Ready};
use tokio::net::TcpStream;

/// A connection-level [`Service`]: given an accepted [`TcpStream`], it
/// produces the per-connection [`RequestService`] to hand to hyper, stamped
/// with the connection's peer address.
///
/// # Examples
///
/// ```no_run
/// use chainroute::{Chain, ResponseWriter, Router, RouterService};
/// use hyper::body::Incoming;
/// use hyper::service::Service;
/// use hyper_util::rt::{TokioExecutor, TokioIo};
/// use hyper_util::server::conn::auto::Builder;
/// use std::net::SocketAddr;
/// use std::sync::Arc;
/// use tokio::net::TcpListener;
///
/// fn router() -> chainroute::Result<Router<Incoming>> {
///     Router::builder()
///         .get(
///             "/",
///             Chain::new(|res, _ctx, next| {
///                 let _ = res.write(b"Home page");
///                 next()
///             }),
///         )
///         .build()
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let service = Arc::new(RouterService::new(router()?));
///
///     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
///     let listener = TcpListener::bind(addr).await?;
///     println!("App is running on: {}", addr);
///
///     loop {
///         let (stream, _) = listener.accept().await?;
///         let service = service.clone();
///
///         tokio::spawn(async move {
///             let request_service = service.call(&stream).await.unwrap();
///             let io = TokioIo::new(stream);
///             let builder = Builder::new(TokioExecutor::new());
///             if let Err(err) = builder.serve_connection(io, request_service).await {
///                 eprintln!("Error serving connection: {:?}", err);
///             }
///         });
///     }
/// }
/// ```
pub struct RouterService<B> {
    builder: RequestServiceBuilder<B>,
}

impl<B> RouterService<B> {
    /// Creates a connection service around the finished router.
    pub fn new(router: Router<B>) -> RouterService<B> {
        RouterService {
            builder: RequestServiceBuilder::new(router),
        }
    }
}

impl<B> Service<&TcpStream> for RouterService<B> {
    type Response = RequestService<B>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, conn: &TcpStream) -> Self::Future {
        let req_service = self.builder.build(conn.peer_addr().ok());

        ready(Ok(req_service))
    }
}

impl<B> Debug for RouterService<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "RouterService {{ builder: {:?} }}", self.builder)
    }
}
