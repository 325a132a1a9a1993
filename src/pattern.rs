use crate::error::Error;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARAM_NAME_RE: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Compiles a route pattern such as `/users/:id` into an anchored regex plus
/// the parameter names in capture order.
///
/// Pattern tokens:
///
/// * `:name` matches exactly one non-empty path segment and captures it.
/// * `*` matches the rest of the path, slashes included, and is only valid as
///   the final segment.
/// * Everything else matches literally.
///
/// The regex is matched against the raw, undecoded request path; captured
/// values are percent-decoded afterwards by the router.
pub(crate) fn compile_route_pattern(pattern: &str) -> crate::Result<(Regex, Vec<String>)> {
    if !pattern.starts_with('/') {
        return Err(Error::new(format!(
            "route pattern must start with '/': {:?}",
            pattern
        )));
    }

    let mut regex_str = String::with_capacity(pattern.len() + 8);
    regex_str.push('^');
    let mut params: Vec<String> = Vec::new();

    let mut segments = pattern[1..].split('/').peekable();
    while let Some(segment) = segments.next() {
        regex_str.push('/');

        if let Some(name) = segment.strip_prefix(':') {
            if !PARAM_NAME_RE.is_match(name) {
                return Err(Error::new(format!(
                    "invalid parameter name {:?} in route pattern {:?}",
                    name, pattern
                )));
            }
            if params.iter().any(|p| p == name) {
                return Err(Error::new(format!(
                    "duplicate parameter name {:?} in route pattern {:?}",
                    name, pattern
                )));
            }
            params.push(name.to_owned());
            regex_str.push_str("([^/]+)");
        } else if segment == "*" {
            if segments.peek().is_some() {
                return Err(Error::new(format!(
                    "wildcard must be the final segment in route pattern {:?}",
                    pattern
                )));
            }
            regex_str.push_str(".*");
        } else {
            regex_str.push_str(&regex::escape(segment));
        }
    }
    regex_str.push('$');

    let regex = Regex::new(&regex_str).map_err(|e| {
        Error::new(format!(
            "could not compile route pattern {:?}: {}",
            pattern, e
        ))
    })?;

    Ok((regex, params))
}

#[cfg(test)]
mod tests {
    use super::compile_route_pattern;

    #[test]
    fn literal_patterns_match_exactly() {
        let (re, params) = compile_route_pattern("/hello").unwrap();
        assert!(params.is_empty());
        assert!(re.is_match("/hello"));
        assert!(!re.is_match("/hello/"));
        assert!(!re.is_match("/hello/world"));
        assert!(!re.is_match("/prefix/hello"));
    }

    #[test]
    fn root_pattern_matches_root_only() {
        let (re, _) = compile_route_pattern("/").unwrap();
        assert!(re.is_match("/"));
        assert!(!re.is_match("/hello"));
    }

    #[test]
    fn params_capture_single_segments() {
        let (re, params) = compile_route_pattern("/users/:user_id/books/:book_id").unwrap();
        assert_eq!(params, vec!["user_id", "book_id"]);

        let caps = re.captures("/users/42/books/dune").unwrap();
        assert_eq!(&caps[1], "42");
        assert_eq!(&caps[2], "dune");

        assert!(!re.is_match("/users//books/dune"));
        assert!(!re.is_match("/users/42/books"));
        assert!(!re.is_match("/users/4/2/books/dune"));
    }

    #[test]
    fn wildcard_matches_any_tail() {
        let (re, params) = compile_route_pattern("/static/*").unwrap();
        assert!(params.is_empty());
        assert!(re.is_match("/static/"));
        assert!(re.is_match("/static/css/site.css"));
        assert!(!re.is_match("/static"));
    }

    #[test]
    fn literal_segments_are_regex_escaped() {
        let (re, _) = compile_route_pattern("/v1.0/items").unwrap();
        assert!(re.is_match("/v1.0/items"));
        assert!(!re.is_match("/v1x0/items"));
    }

    #[test]
    fn rejects_pattern_without_leading_slash() {
        assert!(compile_route_pattern("hello").is_err());
        assert!(compile_route_pattern("").is_err());
    }

    #[test]
    fn rejects_invalid_parameter_names() {
        assert!(compile_route_pattern("/users/:").is_err());
        assert!(compile_route_pattern("/users/:user-id").is_err());
        assert!(compile_route_pattern("/users/:1st").is_err());
    }

    #[test]
    fn rejects_duplicate_parameter_names() {
        assert!(compile_route_pattern("/:id/child/:id").is_err());
    }

    #[test]
    fn rejects_wildcard_in_the_middle() {
        assert!(compile_route_pattern("/static/*/index.html").is_err());
    }
}
