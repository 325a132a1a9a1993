use crate::handler::{Chain, Handler, HandlerRef};
use crate::response::ResponseWriter;
use crate::route::Route;
use crate::types::{RequestContext, RouteParams};
use http::{Method, Request, StatusCode};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

/// Routes inbound requests to the first registered pattern that matches,
/// extracting named path parameters along the way.
///
/// A router holds, per HTTP method, an ordered list of route bindings plus
/// exactly one fallback chain that runs when nothing matches. It is built
/// once through [`RouterBuilder`] and never mutated afterwards, so concurrent
/// requests share it without locking.
///
/// # Examples
///
/// ```
/// use chainroute::{Chain, ResponseBuffer, ResponseWriter, Router};
/// use http::Request;
///
/// let router: Router<()> = Router::builder()
///     .get(
///         "/hello/:name",
///         Chain::new(|res, ctx, next| {
///             let _ = res.write(ctx.param("name").unwrap_or("").as_bytes());
///             next()
///         }),
///     )
///     .build()
///     .unwrap();
///
/// let req = Request::builder().uri("/hello/John%20Doe").body(()).unwrap();
/// let mut res = ResponseBuffer::new();
/// router.serve(&mut res, req);
/// assert_eq!(res.body(), b"John Doe");
/// ```
pub struct Router<B> {
    pub(crate) routes: HashMap<Method, Vec<Route<B>>>,
    pub(crate) fallback: HandlerRef<B>,
}

impl<B> Router<B> {
    /// Starts building a router.
    pub fn builder() -> RouterBuilder<B> {
        RouterBuilder::new()
    }

    /// Dispatches one inbound request.
    ///
    /// The bindings registered for the request's method are tried strictly in
    /// registration order against the raw request path; the first match wins
    /// and its chain runs with the decoded captures. When the method has no
    /// bindings or no pattern matches, the fallback chain runs with an empty
    /// parameter mapping. Exactly one chain executes per call either way.
    pub fn serve(&self, res: &mut dyn ResponseWriter, req: Request<B>) {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        if let Some(routes) = self.routes.get(&method) {
            for route in routes {
                if let Some(params) = route.matches(&path) {
                    tracing::debug!(%method, %path, pattern = %route.pattern, "request matched route");
                    let ctx = RequestContext::new(req, params);
                    route.handler.handle_all(res, &ctx);
                    return;
                }
            }
        }

        tracing::debug!(%method, %path, "no route matched, running fallback");
        let ctx = RequestContext::new(req, RouteParams::new());
        self.fallback.handle_all(res, &ctx);
    }
}

impl<B> Debug for Router<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<String> = self
            .routes
            .iter()
            .flat_map(|(method, routes)| {
                routes
                    .iter()
                    .map(move |route| format!("{} {}", method, route.pattern))
            })
            .collect();
        routes.sort();
        write!(f, "Router {{ routes: {:?} }}", routes)
    }
}

/// Builds a [`Router`].
///
/// Registration methods consume and return the builder, so route tables are
/// assembled in one expression and sealed by [`build`](RouterBuilder::build).
/// An invalid route pattern is a configuration error: it is carried by the
/// builder and surfaced by `build`, never deferred to request time. Because
/// `build` consumes the builder, registration cannot race with serving.
pub struct RouterBuilder<B> {
    inner: crate::Result<BuilderInner<B>>,
}

struct BuilderInner<B> {
    routes: HashMap<Method, Vec<Route<B>>>,
    fallback: Option<HandlerRef<B>>,
}

impl<B> RouterBuilder<B> {
    pub(crate) fn new() -> RouterBuilder<B> {
        RouterBuilder {
            inner: Ok(BuilderInner {
                routes: HashMap::new(),
                fallback: None,
            }),
        }
    }

    fn and_then<F>(self, func: F) -> RouterBuilder<B>
    where
        F: FnOnce(BuilderInner<B>) -> crate::Result<BuilderInner<B>>,
    {
        RouterBuilder {
            inner: self.inner.and_then(func),
        }
    }

    /// Registers a handler chain for the given method and route pattern.
    ///
    /// Bindings are appended, and registration order is match-priority order:
    /// the first registered pattern that matches a request wins, with no
    /// specificity scoring.
    pub fn route<P, H>(self, method: Method, pattern: P, chain: H) -> RouterBuilder<B>
    where
        P: Into<String>,
        H: Into<HandlerRef<B>>,
    {
        let pattern = pattern.into();
        let handler = chain.into();
        self.and_then(move |mut inner| {
            let route = Route::new(pattern, handler)?;
            inner.routes.entry(method).or_default().push(route);
            Ok(inner)
        })
    }

    /// Registers a chain for `GET` requests at `pattern`.
    pub fn get<P: Into<String>, H: Into<HandlerRef<B>>>(self, pattern: P, chain: H) -> RouterBuilder<B> {
        self.route(Method::GET, pattern, chain)
    }

    /// Registers a chain for `POST` requests at `pattern`.
    pub fn post<P: Into<String>, H: Into<HandlerRef<B>>>(self, pattern: P, chain: H) -> RouterBuilder<B> {
        self.route(Method::POST, pattern, chain)
    }

    /// Registers a chain for `PUT` requests at `pattern`.
    pub fn put<P: Into<String>, H: Into<HandlerRef<B>>>(self, pattern: P, chain: H) -> RouterBuilder<B> {
        self.route(Method::PUT, pattern, chain)
    }

    /// Registers a chain for `DELETE` requests at `pattern`.
    pub fn delete<P: Into<String>, H: Into<HandlerRef<B>>>(self, pattern: P, chain: H) -> RouterBuilder<B> {
        self.route(Method::DELETE, pattern, chain)
    }

    /// Registers a chain for `HEAD` requests at `pattern`.
    pub fn head<P: Into<String>, H: Into<HandlerRef<B>>>(self, pattern: P, chain: H) -> RouterBuilder<B> {
        self.route(Method::HEAD, pattern, chain)
    }

    /// Registers a chain for `OPTIONS` requests at `pattern`.
    pub fn options<P: Into<String>, H: Into<HandlerRef<B>>>(self, pattern: P, chain: H) -> RouterBuilder<B> {
        self.route(Method::OPTIONS, pattern, chain)
    }

    /// Registers a chain for `PATCH` requests at `pattern`.
    pub fn patch<P: Into<String>, H: Into<HandlerRef<B>>>(self, pattern: P, chain: H) -> RouterBuilder<B> {
        self.route(Method::PATCH, pattern, chain)
    }

    /// Replaces the fallback chain run when no binding matches.
    ///
    /// Routers built without an explicit fallback respond with a plain
    /// `404 page not found` error chain.
    pub fn fallback<H: Into<HandlerRef<B>>>(self, chain: H) -> RouterBuilder<B> {
        let handler = chain.into();
        self.and_then(move |mut inner| {
            inner.fallback = Some(handler);
            Ok(inner)
        })
    }

    /// Seals the builder, surfacing the first registration error if any.
    pub fn build(self) -> crate::Result<Router<B>>
    where
        B: 'static,
    {
        let inner = self.inner?;
        let fallback = inner
            .fallback
            .unwrap_or_else(|| Chain::error(StatusCode::NOT_FOUND, "404 page not found").into_handler());

        Ok(Router {
            routes: inner.routes,
            fallback,
        })
    }
}
