use bytes::Bytes;
use chainroute::{Router, RouterService};
use http_body_util::Empty;
use hyper::body::{Body, Incoming};
use hyper::service::Service;
use hyper::{Method, Response};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot::{self, Sender};

pub struct Serve {
    addr: SocketAddr,
    tx: Sender<()>,
}

impl Serve {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(self) {
        let _ = self.tx.send(());
    }
}

/// Binds the router to an ephemeral local port and serves it until
/// `Serve::shutdown` is called.
pub async fn serve(router: Router<Incoming>) -> Serve {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router_service = Arc::new(RouterService::new(router));
    let (tx, mut rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = &mut rx => break,
                accepted = listener.accept() => {
                    let (stream, _) = accepted.unwrap();
                    let router_service = router_service.clone();
                    tokio::spawn(async move {
                        let request_service = router_service.call(&stream).await.unwrap();
                        let io = TokioIo::new(stream);
                        let builder = Builder::new(TokioExecutor::new());
                        if let Err(err) = builder.serve_connection(io, request_service).await {
                            eprintln!("Error serving connection: {:?}", err);
                        }
                    });
                }
            }
        }
    });

    Serve { addr, tx }
}

pub async fn request(addr: SocketAddr, method: Method, route: &str) -> Response<Incoming> {
    let client: Client<HttpConnector, Empty<Bytes>> =
        Client::builder(TokioExecutor::new()).build_http();
    let req = http::Request::builder()
        .method(method)
        .uri(format!("http://{}{}", addr, route))
        .body(Empty::new())
        .unwrap();

    client.request(req).await.unwrap()
}

pub async fn into_text<B>(body: B) -> String
where
    B: Body<Data = Bytes> + Send,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    use http_body_util::BodyExt;
    String::from_utf8_lossy(&body.collect().await.unwrap().to_bytes()).to_string()
}
