use crate::response::ResponseWriter;
use crate::types::RequestContext;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

pub use self::raw::RawHandler;

mod error;
mod raw;

/// A shared reference to a handler node.
///
/// Chains are built once at registration time and shared read-only across
/// every concurrent request, so nodes always travel behind an `Arc`.
pub type HandlerRef<B> = Arc<dyn Handler<B>>;

/// The zero-argument accessor handed to a step function. Calling it yields
/// the current node's statically linked successor, or `None` at the end of
/// the chain.
pub type Next<'a, B> = &'a dyn Fn() -> Option<HandlerRef<B>>;

type StepFn<B> = Box<
    dyn Fn(&mut dyn ResponseWriter, &RequestContext<B>, Next<'_, B>) -> Option<HandlerRef<B>>
        + Send
        + Sync
        + 'static,
>;

/// One link in a request-processing chain.
///
/// A handler executes its own logic against the response sink and request
/// context, then decides what runs next: returning `next()` continues the
/// chain it was built into, returning a different handler redirects execution
/// into that handler's chain, and returning `None` ends processing.
///
/// The `B` type parameter is the request body type carried by the
/// [`RequestContext`]; the chain protocol itself never reads the body.
pub trait Handler<B>: Send + Sync {
    /// Runs this node's step with the given sink, context and successor
    /// accessor, returning the handler to run next.
    fn handle(
        &self,
        res: &mut dyn ResponseWriter,
        ctx: &RequestContext<B>,
        next: Next<'_, B>,
    ) -> Option<HandlerRef<B>>;

    /// The statically linked successor of this node, fixed at construction.
    fn next(&self) -> Option<HandlerRef<B>>;

    /// Runs this node and then every handler it transitively yields.
    ///
    /// The loop is agnostic to whether progression is static (a step returned
    /// its own successor via `next()`) or dynamic (a step returned a
    /// different handler, whose own linkage is followed from then on). It
    /// terminates when a step returns `None`.
    fn handle_all(&self, res: &mut dyn ResponseWriter, ctx: &RequestContext<B>) {
        let mut current = self.handle(res, ctx, &|| self.next());
        while let Some(handler) = current {
            current = handler.handle(res, ctx, &|| handler.next());
        }
    }
}

/// The default [`Handler`] node: a boxed step function plus the successor it
/// was linked to when the chain was built.
struct Step<B> {
    func: StepFn<B>,
    next: Option<HandlerRef<B>>,
}

impl<B> Handler<B> for Step<B> {
    fn handle(
        &self,
        res: &mut dyn ResponseWriter,
        ctx: &RequestContext<B>,
        next: Next<'_, B>,
    ) -> Option<HandlerRef<B>> {
        (self.func)(res, ctx, next)
    }

    fn next(&self) -> Option<HandlerRef<B>> {
        self.next.clone()
    }
}

/// Builds a handler chain from one or more step functions.
///
/// Each step receives the response sink, the request context and a `next`
/// accessor for its statically linked successor. Steps are linked in the
/// order they are added; the last step's successor is `None`.
///
/// # Examples
///
/// ```
/// use chainroute::{Chain, Handler, RequestContext, ResponseBuffer, ResponseWriter, RouteParams};
/// use http::Request;
///
/// let chain = Chain::new(|res, _ctx, next| {
///     let _ = res.write(b"hello ");
///     next()
/// })
/// .step(|res, _ctx, next| {
///     let _ = res.write(b"world");
///     next()
/// })
/// .into_handler();
///
/// let req = Request::builder().uri("/").body(()).unwrap();
/// let ctx = RequestContext::new(req, RouteParams::new());
/// let mut res = ResponseBuffer::new();
/// chain.handle_all(&mut res, &ctx);
/// assert_eq!(res.body(), b"hello world");
/// ```
pub struct Chain<B> {
    steps: Vec<StepFn<B>>,
}

impl<B: 'static> Chain<B> {
    /// Creates a chain holding a single step.
    pub fn new<F>(step: F) -> Chain<B>
    where
        F: Fn(&mut dyn ResponseWriter, &RequestContext<B>, Next<'_, B>) -> Option<HandlerRef<B>>
            + Send
            + Sync
            + 'static,
    {
        let step: StepFn<B> = Box::new(step);
        Chain { steps: vec![step] }
    }

    /// Appends a step; it becomes the statically linked successor of the step
    /// added before it.
    pub fn step<F>(mut self, step: F) -> Chain<B>
    where
        F: Fn(&mut dyn ResponseWriter, &RequestContext<B>, Next<'_, B>) -> Option<HandlerRef<B>>
            + Send
            + Sync
            + 'static,
    {
        let step: StepFn<B> = Box::new(step);
        self.steps.push(step);
        self
    }

    /// Links the steps into handler nodes and returns the head of the chain.
    ///
    /// Nodes are built back to front so every node's successor already exists
    /// when the node is created; the linkage is forward-only and fixed for
    /// the lifetime of the chain.
    pub fn into_handler(self) -> HandlerRef<B> {
        let mut next: Option<HandlerRef<B>> = None;
        for func in self.steps.into_iter().rev() {
            next = Some(Arc::new(Step { func, next }));
        }
        next.expect("a chain always holds at least one step")
    }
}

impl<B: 'static> From<Chain<B>> for HandlerRef<B> {
    fn from(chain: Chain<B>) -> HandlerRef<B> {
        chain.into_handler()
    }
}

impl<B> Debug for Chain<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Chain {{ steps: {} }}", self.steps.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseBuffer;
    use crate::types::RouteParams;
    use http::{Method, Request, StatusCode};

    fn context(method: Method) -> RequestContext<()> {
        let req = Request::builder().method(method).uri("/").body(()).unwrap();
        RequestContext::new(req, RouteParams::new())
    }

    #[test]
    fn single_step_writes_body() {
        let chain: HandlerRef<()> = Chain::new(|res, _ctx, next| {
            let _ = res.write(b"abcd");
            next()
        })
        .into_handler();

        let mut res = ResponseBuffer::new();
        chain.handle_all(&mut res, &context(Method::GET));
        assert_eq!(res.body(), b"abcd");
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[test]
    fn steps_run_in_registration_order() {
        let chain: HandlerRef<()> = Chain::new(|res, _ctx, next| {
            let _ = res.write(b"s1");
            next()
        })
        .step(|res, _ctx, next| {
            let _ = res.write(b"s2");
            next()
        })
        .step(|res, _ctx, next| {
            let _ = res.write(b"s3");
            next()
        })
        .into();

        let mut res = ResponseBuffer::new();
        chain.handle_all(&mut res, &context(Method::GET));
        assert_eq!(res.body(), b"s1s2s3");
    }

    #[test]
    fn step_returning_error_chain_skips_the_rest() {
        let bad_request: HandlerRef<()> =
            Chain::error(StatusCode::BAD_REQUEST, "Bad Request").into_handler();

        let chain: HandlerRef<()> = Chain::new(move |res, ctx, next| {
            if ctx.method() == Method::POST {
                return Some(bad_request.clone());
            }
            let _ = res.write(b"abcd");
            next()
        })
        .step(|res, _ctx, next| {
            let _ = res.write(b"efgh");
            next()
        })
        .into();

        // Good case: both steps run.
        let mut res = ResponseBuffer::new();
        chain.handle_all(&mut res, &context(Method::GET));
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body(), b"abcdefgh");

        // Error case: the redirected chain runs, the original successor never
        // does.
        let mut res = ResponseBuffer::new();
        chain.handle_all(&mut res, &context(Method::POST));
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = String::from_utf8_lossy(res.body()).to_string();
        assert!(body.contains("Bad Request"));
        assert!(!body.contains("efgh"));
    }

    #[test]
    fn redirect_target_runs_its_own_linkage() {
        let alternate: HandlerRef<()> = Chain::new(|res, _ctx, next| {
            let _ = res.write(b"alt1");
            next()
        })
        .step(|res, _ctx, next| {
            let _ = res.write(b"alt2");
            next()
        })
        .into();

        let chain: HandlerRef<()> = Chain::new(move |_res, _ctx, _next| Some(alternate.clone()))
            .step(|res, _ctx, next| {
                let _ = res.write(b"never");
                next()
            })
            .into();

        let mut res = ResponseBuffer::new();
        chain.handle_all(&mut res, &context(Method::GET));
        assert_eq!(res.body(), b"alt1alt2");
    }

    #[test]
    fn step_returning_none_ends_the_chain() {
        let chain: HandlerRef<()> = Chain::new(|res, _ctx, _next| {
            let _ = res.write(b"done");
            None
        })
        .step(|res, _ctx, next| {
            let _ = res.write(b"never");
            next()
        })
        .into();

        let mut res = ResponseBuffer::new();
        chain.handle_all(&mut res, &context(Method::GET));
        assert_eq!(res.body(), b"done");
    }

    #[test]
    fn next_exposes_the_static_successor() {
        let chain: HandlerRef<()> = Chain::new(|_res, _ctx, next| next())
            .step(|res, _ctx, next| {
                let _ = res.write(b"tail");
                next()
            })
            .into();

        let successor = chain.next().unwrap();
        assert!(successor.next().is_none());

        let mut res = ResponseBuffer::new();
        successor.handle_all(&mut res, &context(Method::GET));
        assert_eq!(res.body(), b"tail");
    }
}
