//! `chainroute` provides a lightweight, composable handler-chain router for the Rust HTTP library [hyper](https://hyper.rs/).
//!
//! Its core features:
//!
//! - 🔗 Request handling as explicit chains of steps, where any step can continue, stop, or redirect into a different chain
//! - 🚀 First-match routing over `:param` patterns compiled to anchored regexes
//! - 🍺 Named path parameters, percent-decoded before handlers see them
//! - ❗ Error handling by short-circuiting into fixed-status error chains, with no exception channel
//! - 💁 A fallback chain for everything that matches no route
//! - 🔌 A [`service`] layer that plugs a [`Router`] straight into a hyper server
//!
//! ## Basic Example
//!
//! A simple example using `chainroute` with `hyper` would look like the following:
//!
//! ```no_run
//! use chainroute::{Chain, ResponseWriter, Router, RouterService};
//! use hyper::body::Incoming;
//! use hyper::service::Service;
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! fn router() -> chainroute::Result<Router<Incoming>> {
//!     Router::builder()
//!         // A handler for "/" page.
//!         .get(
//!             "/",
//!             Chain::new(|res, _ctx, next| {
//!                 let _ = res.write(b"Home page");
//!                 next()
//!             }),
//!         )
//!         // A handler for "/users/:userId" page.
//!         .get(
//!             "/users/:userId",
//!             Chain::new(|res, ctx, next| {
//!                 let greeting = format!("Hello {}", ctx.param("userId").unwrap_or("stranger"));
//!                 let _ = res.write(greeting.as_bytes());
//!                 next()
//!             }),
//!         )
//!         .build()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let service = Arc::new(RouterService::new(router()?));
//!
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!     let listener = TcpListener::bind(addr).await?;
//!     println!("App is running on: {}", addr);
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let service = service.clone();
//!
//!         tokio::spawn(async move {
//!             let request_service = service.call(&stream).await.unwrap();
//!             let io = TokioIo::new(stream);
//!             let builder = Builder::new(TokioExecutor::new());
//!             if let Err(err) = builder.serve_connection(io, request_service).await {
//!                 eprintln!("Error serving connection: {:?}", err);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! ## Handler chains
//!
//! A chain is an ordered, immutable sequence of step functions built at
//! registration time. Each step receives the response sink, the
//! [`RequestContext`], and a `next` accessor yielding the step's statically
//! linked successor. Whatever handler a step returns is what runs next:
//!
//! - `next()` continues the chain the step was built into,
//! - some other [`HandlerRef`] redirects execution into that chain,
//! - `None` ends processing.
//!
//! Redirecting is the error-propagation mechanism: instead of throwing, a
//! step returns an error chain and the remaining steps of the original chain
//! never run.
//!
//! ```
//! use chainroute::{Chain, HandlerRef, ResponseBuffer, ResponseWriter, Router};
//! use http::{Method, Request, StatusCode};
//!
//! let bad_request: HandlerRef<()> = Chain::error(StatusCode::BAD_REQUEST, "Bad Request").into();
//!
//! let router: Router<()> = Router::builder()
//!     .get(
//!         "/greet",
//!         Chain::new(move |_res, ctx, next| {
//!             if ctx.param("name").is_none() {
//!                 return Some(bad_request.clone());
//!             }
//!             next()
//!         })
//!         .step(|res, _ctx, next| {
//!             let _ = res.write(b"hi");
//!             next()
//!         }),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let req = Request::builder().method(Method::GET).uri("/greet").body(()).unwrap();
//! let mut res = ResponseBuffer::new();
//! router.serve(&mut res, req);
//! assert_eq!(res.status(), StatusCode::BAD_REQUEST);
//! ```
//!
//! ## Route patterns
//!
//! Route paths are matched against the raw request path, whole-path and in
//! registration order; the first match wins, with no specificity scoring.
//! `:name` tokens match exactly one non-empty segment and expose the captured
//! value through [`RequestContext::param`], percent-decoded. A trailing `*`
//! matches any remainder of the path:
//!
//! ```txt
//! Route path: /users/:userName/books/:bookName
//! Request URL: http://localhost:3000/users/alice/books/HarryPotter
//! ctx.param("userName") == Some("alice"), ctx.param("bookName") == Some("HarryPotter")
//! ```
//!
//! Invalid patterns (no leading slash, bad or duplicate parameter names, a
//! wildcard before the final segment) are configuration errors surfaced by
//! [`RouterBuilder::build`], never at request time.
//!
//! ## Fallback
//!
//! Exactly one fallback chain runs whenever a request's method has no
//! bindings or no pattern matches; by default it is a
//! `404 page not found` error chain, and
//! [`RouterBuilder::fallback`] replaces it:
//!
//! ```
//! use chainroute::{Chain, ResponseBuffer, Router};
//! use http::{Request, StatusCode};
//!
//! let router: Router<()> = Router::builder()
//!     .fallback(Chain::error(StatusCode::NOT_FOUND, "NOT FOUND"))
//!     .build()
//!     .unwrap();
//!
//! let req = Request::builder().uri("/nowhere").body(()).unwrap();
//! let mut res = ResponseBuffer::new();
//! router.serve(&mut res, req);
//! assert_eq!(res.status(), StatusCode::NOT_FOUND);
//! ```
//!
//! ## Concurrency
//!
//! Routers and chains are built once, before serving begins, and never
//! mutated afterwards; concurrent requests only read them, so no locking is
//! involved anywhere. Everything per-request (the context, the parameters,
//! the response sink) is owned by that single request. Chain execution runs
//! to completion without internal suspension; timeouts and cancellation are
//! the transport's business, not this crate's.

pub use self::error::Error;
pub use self::handler::{Chain, Handler, HandlerRef, Next, RawHandler};
pub use self::response::{ResponseBuffer, ResponseWriter};
pub use self::route::Route;
pub use self::router::{Router, RouterBuilder};
pub use self::service::{RequestService, RequestServiceBuilder, RouterService};
pub use self::types::{RemoteAddr, RequestContext, RouteParams};

mod error;
mod handler;
mod helpers;
mod pattern;
mod response;
mod route;
mod router;
mod service;
mod types;

/// A Result type often returned from methods that register routes.
pub type Result<T> = std::result::Result<T, Error>;
