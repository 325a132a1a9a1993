use crate::handler::HandlerRef;
use crate::helpers;
use crate::pattern::compile_route_pattern;
use crate::types::RouteParams;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};

/// One binding between a compiled route pattern and the handler chain to run
/// when it matches.
///
/// Routes are created through [`RouterBuilder`](crate::RouterBuilder)
/// registration methods and owned by the router for its whole lifetime.
pub struct Route<B> {
    pub(crate) pattern: String,
    pub(crate) regex: Regex,
    pub(crate) params: Vec<String>,
    pub(crate) handler: HandlerRef<B>,
}

impl<B> Route<B> {
    pub(crate) fn new<P: Into<String>>(pattern: P, handler: HandlerRef<B>) -> crate::Result<Route<B>> {
        let pattern = pattern.into();
        let (regex, params) = compile_route_pattern(&pattern)?;

        Ok(Route {
            pattern,
            regex,
            params,
            handler,
        })
    }

    /// Matches the raw (undecoded) request path against this route's
    /// pattern, returning the percent-decoded captures on a hit.
    pub(crate) fn matches(&self, path: &str) -> Option<RouteParams> {
        let caps = self.regex.captures(path)?;

        let mut params = RouteParams::with_capacity(self.params.len());
        let mut groups = caps.iter();
        // Skip the first group, it is the whole-path match.
        groups.next();
        for name in &self.params {
            if let Some(Some(group)) = groups.next() {
                params.set(name.clone(), helpers::percent_decode(group.as_str()));
            }
        }

        Some(params)
    }
}

impl<B> Debug for Route<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ pattern: {:?}, regex: {:?}, params: {:?} }}",
            self.pattern, self.regex, self.params
        )
    }
}
