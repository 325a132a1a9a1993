use chainroute::{Chain, ResponseWriter, Router, RouterService};
use hyper::body::Incoming;
use hyper::service::Service;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

fn router() -> chainroute::Result<Router<Incoming>> {
    Router::builder()
        .get(
            "/",
            Chain::new(|res, _ctx, next| {
                let _ = res.write(b"Home page");
                next()
            }),
        )
        .get(
            "/hello",
            Chain::new(|res, _ctx, next| {
                let _ = res.write(b"Hello, world!");
                next()
            }),
        )
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
