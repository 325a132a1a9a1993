use http::{Method, Request};
use std::collections::HashMap;
use std::net::SocketAddr;

/// The parameters captured from the request path, keyed by the `:name` tokens
/// of the matched route pattern.
///
/// Keys are unique within a pattern and values are percent-decoded before
/// they reach any handler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn new() -> RouteParams {
        RouteParams(HashMap::new())
    }

    pub(crate) fn with_capacity(capacity: usize) -> RouteParams {
        RouteParams(HashMap::with_capacity(capacity))
    }

    /// Stores a parameter value.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the value captured for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Marker stored in the request extensions by the connection service to make
/// the peer address available to handlers via
/// [`RequestContext::remote_addr`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemoteAddr(pub SocketAddr);

/// An enriched view of one inbound request: the raw `http::Request` plus the
/// route parameters extracted while matching.
///
/// The router creates exactly one context per inbound request and hands it to
/// the chosen handler chain; it lives for that single request and is never
/// shared across requests.
pub struct RequestContext<B> {
    params: RouteParams,
    request: Request<B>,
}

impl<B> RequestContext<B> {
    pub fn new(request: Request<B>, params: RouteParams) -> RequestContext<B> {
        RequestContext { params, request }
    }

    /// The raw inbound request.
    pub fn request(&self) -> &Request<B> {
        &self.request
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// The raw (undecoded) request path.
    pub fn path(&self) -> &str {
        self.request.uri().path()
    }

    /// The decoded value captured for the `:name` pattern token, if the
    /// matched route had one.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// The peer address, when the request arrived through
    /// [`RouterService`](crate::RouterService).
    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.request
            .extensions()
            .get::<RemoteAddr>()
            .map(|addr| addr.0)
    }
}
