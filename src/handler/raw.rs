use super::Chain;
use crate::response::ResponseWriter;
use http::Request;

/// A request handler that predates the chaining protocol: a single entry
/// point taking the response sink and the raw request.
///
/// The trait is blanket-implemented for matching closures and function
/// pointers, so most callers never implement it by hand.
pub trait RawHandler<B>: Send + Sync {
    fn serve(&self, res: &mut dyn ResponseWriter, req: &Request<B>);
}

impl<B, F> RawHandler<B> for F
where
    F: Fn(&mut dyn ResponseWriter, &Request<B>) + Send + Sync,
{
    fn serve(&self, res: &mut dyn ResponseWriter, req: &Request<B>) {
        self(res, req)
    }
}

impl<B: 'static> Chain<B> {
    /// Creates a single-step chain that delegates the entire request to a
    /// [`RawHandler`], then continues to its successor.
    ///
    /// This embeds handlers written against the bare sink-and-request shape
    /// inside a chain without rewriting them as step functions.
    pub fn raw<H>(handler: H) -> Chain<B>
    where
        H: RawHandler<B> + 'static,
    {
        Chain::new(move |res, ctx, next| {
            handler.serve(res, ctx.request());
            next()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::handler::{Chain, Handler, HandlerRef};
    use crate::response::{ResponseBuffer, ResponseWriter};
    use crate::types::{RequestContext, RouteParams};
    use http::{Request, StatusCode};

    #[test]
    fn raw_handler_sees_the_raw_request_and_chain_continues() {
        fn legacy(res: &mut dyn ResponseWriter, req: &Request<()>) {
            res.set_status(StatusCode::ACCEPTED);
            let _ = res.write(req.uri().path().as_bytes());
        }

        let chain: HandlerRef<()> = Chain::raw(legacy)
            .step(|res, _ctx, next| {
                let _ = res.write(b"+chained");
                next()
            })
            .into();

        let req = Request::builder().uri("/legacy").body(()).unwrap();
        let ctx = RequestContext::new(req, RouteParams::new());

        let mut res = ResponseBuffer::new();
        chain.handle_all(&mut res, &ctx);
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(res.body(), b"/legacy+chained");
    }
}
