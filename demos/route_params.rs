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
        // Captured segments are exposed through the request context,
        // percent-decoded. Try: curl http://localhost:3000/users/alice/books/HarryPotter
        .get(
            "/users/:userName/books/:bookName",
            Chain::new(|res, ctx, next| {
                let user_name = ctx.param("userName").unwrap_or("unknown");
                let book_name = ctx.param("bookName").unwrap_or("unknown");
                let body = format!("Username: {}, Book Name: {}", user_name, book_name);
                let _ = res.write(body.as_bytes());
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
