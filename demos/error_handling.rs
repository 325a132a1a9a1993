use chainroute::{Chain, HandlerRef, ResponseWriter, Router, RouterService};
use http::StatusCode;
use hyper::body::Incoming;
use hyper::service::Service;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

fn router() -> chainroute::Result<Router<Incoming>> {
    // A step signals failure by returning a different chain instead of
    // continuing. Here the first step validates the request and redirects
    // into a fixed-status error chain when validation fails; the second step
    // never runs in that case.
    let unauthorized: HandlerRef<Incoming> =
        Chain::error(StatusCode::UNAUTHORIZED, "Unauthorized").into();

    Router::builder()
        .get(
            "/secret",
            Chain::new(move |_res, ctx, next| {
                if ctx.request().headers().get("x-api-key").is_none() {
                    return Some(unauthorized.clone());
                }
                next()
            })
            .step(|res, _ctx, next| {
                let _ = res.write(b"The secret page");
                next()
            }),
        )
        // Everything else lands on a custom fallback chain.
        .fallback(Chain::error(StatusCode::NOT_FOUND, "NOT FOUND"))
        .build()
}

#[tokio::main]
async fn main() {
    let router = router().unwrap();

    let service = Arc::new(RouterService::new(router));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = TcpListener::bind(addr).await.unwrap();
    println!("App is running on: {}", addr);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let service = Arc::clone(&service);

                tokio::spawn(async move {
                    let request_service = service.call(&stream).await.unwrap();
                    let io = TokioIo::new(stream);
                    let builder = Builder::new(TokioExecutor::new());
                    if let Err(err) = builder.serve_connection(io, request_service).await {
                        eprintln!("Error serving connection: {:?}", err);
                    }
                });
            }
            Err(e) => {
                eprintln!("Error accepting connection: {}", e);
            }
        }
    }
}
