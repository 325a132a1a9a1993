use super::Chain;
use crate::response::ResponseWriter;
use http::header::{HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::StatusCode;

impl<B: 'static> Chain<B> {
    /// Creates a single-step chain that writes a fixed status code and
    /// message, then continues to its successor (none by default, ending the
    /// chain).
    ///
    /// The response follows the plain-text error convention: the body is the
    /// message followed by a newline, served as `text/plain; charset=utf-8`
    /// with sniffing disabled. Error chains work both as a router fallback
    /// and as a short-circuit target returned from a step.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainroute::{Chain, Handler, HandlerRef, RequestContext, ResponseBuffer, RouteParams};
    /// use http::{Request, StatusCode};
    ///
    /// let not_found: HandlerRef<()> = Chain::error(StatusCode::NOT_FOUND, "404 not found").into();
    ///
    /// let req = Request::builder().uri("/missing").body(()).unwrap();
    /// let mut res = ResponseBuffer::new();
    /// not_found.handle_all(&mut res, &RequestContext::new(req, RouteParams::new()));
    /// assert_eq!(res.status(), StatusCode::NOT_FOUND);
    /// ```
    pub fn error<M: Into<String>>(status: StatusCode, message: M) -> Chain<B> {
        let message = message.into();
        Chain::new(move |res, _ctx, next| {
            res.set_status(status);
            res.set_header(
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            res.set_header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
            let _ = res.write(message.as_bytes());
            let _ = res.write(b"\n");
            next()
        })
    }
}
