//! HTTP dev server for the mock API
//!
//! An axum router whose fallback hands every request to a [`Transport`].
//! Paired with [`MockFetch`](crate::MockFetch) this exposes the mock routes
//! to any HTTP client and forwards everything else to the real origin.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use bookfair_core::Method;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, warn, Level};

use crate::error::Result;
use crate::protocol::{ApiRequest, ApiResponse};
use crate::transport::Transport;

/// Maximum accepted request body (1MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Response headers hyper manages itself
const MANAGED_HEADERS: [&str; 3] = ["content-length", "connection", "transfer-encoding"];

/// Dev server handle
pub struct Server {
    addr: SocketAddr,
    shutdown_tx: broadcast::Sender<()>,
}

impl Server {
    /// Start a new server on the given port (0 picks a free port)
    pub async fn start<T>(port: u16, transport: Arc<T>) -> Result<Self>
    where
        T: Transport + 'static,
    {
        let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), port);
        let listener = TcpListener::bind(addr).await?;
        let bound_addr = listener.local_addr()?;

        let app = Router::new()
            .fallback(forward::<T>)
            .with_state(transport)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            );

        let (shutdown_tx, _) = broadcast::channel(1);
        let mut shutdown_rx = shutdown_tx.subscribe();

        tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.recv().await;
                info!("Server shutting down");
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!(error = %e, "Server stopped unexpectedly");
            }
        });

        info!(addr = %bound_addr, "Server started");

        Ok(Server {
            addr: bound_addr,
            shutdown_tx,
        })
    }

    /// Get the server's bound address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
        info!("Server shutdown initiated");
    }
}

/// Fallback handler: every request goes through the transport
async fn forward<T>(State(transport): State<Arc<T>>, request: Request) -> Response
where
    T: Transport + 'static,
{
    let request = match into_api_request(request).await {
        Ok(request) => request,
        Err(message) => {
            warn!(error = %message, "Rejected request");
            return (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response();
        }
    };

    let url = request.url.clone();
    match transport.send(request).await {
        Ok(response) => into_response(response),
        Err(e) => {
            warn!(url = %url, error = %e, "Upstream request failed");
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

async fn into_api_request(request: Request) -> std::result::Result<ApiRequest, String> {
    let (parts, body) = request.into_parts();

    let url = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());
    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let bytes = to_bytes(body, MAX_BODY_SIZE)
        .await
        .map_err(|e| format!("Unreadable request body: {}", e))?;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8(bytes.to_vec()).map_err(|_| "Request body is not UTF-8".to_string())?)
    };

    Ok(ApiRequest {
        method: Method::parse(parts.method.as_str()),
        url,
        headers,
        body,
    })
}

fn into_response(response: ApiResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut out = Response::new(Body::from(response.body));
    *out.status_mut() = status;

    let headers = out.headers_mut();
    for (name, value) in response.headers {
        if MANAGED_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            headers.append(name, value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::MockFetch;
    use crate::transport::HttpTransport;
    use bookfair_core::MockRouter;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn start_mock_server() -> Server {
        let upstream = HttpTransport::new("http://127.0.0.1:9").unwrap();
        let fetch = MockFetch::new(MockRouter::seeded(), upstream).with_latency(Duration::ZERO);
        Server::start(0, Arc::new(fetch)).await.unwrap()
    }

    fn url(server: &Server, path: &str) -> String {
        format!("http://{}{}", server.addr(), path)
    }

    #[tokio::test]
    async fn test_server_start() {
        let server = start_mock_server().await;
        assert!(server.addr().port() > 0);
        server.shutdown();
    }

    #[tokio::test]
    async fn test_server_serves_mock_routes() {
        let server = start_mock_server().await;
        let http = reqwest::Client::new();

        let response = http
            .post(url(&server, "/api/stalls/A02/assign"))
            .header("Content-Type", "application/json")
            .body(r#"{"vendorId":"V002"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let stall: serde_json::Value = response.json().await.unwrap();
        assert_eq!(stall["publisher"], "Vijitha Yapa");

        // State persists across requests
        let stalls: Vec<serde_json::Value> = http
            .get(url(&server, "/api/stalls"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let a02 = stalls.iter().find(|s| s["id"] == "A02").unwrap();
        assert_eq!(a02["status"], "reserved");

        server.shutdown();
    }

    #[tokio::test]
    async fn test_chunked_body_is_decoded() {
        let server = start_mock_server().await;

        let mut stream = TcpStream::connect(server.addr()).await.unwrap();
        let body = r#"{"name":"Acme","contactNumber":"123"}"#;
        let raw = format!(
            "POST /api/business HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n{:x}\r\n{}\r\n0\r\n\r\n",
            body.len(),
            body
        );
        stream.write_all(raw.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 201"));
        assert!(response.contains(r#""name":"Acme""#));
        assert!(response.contains(r#""contactNumber":"123""#));

        server.shutdown();
    }

    #[tokio::test]
    async fn test_non_utf8_body_rejected() {
        let server = start_mock_server().await;

        let response = reqwest::Client::new()
            .post(url(&server, "/api/vendors"))
            .body(vec![0xff, 0xfe, 0xfd])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);

        let vendors: Vec<serde_json::Value> = reqwest::get(url(&server, "/api/vendors"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(vendors.len(), 2);

        server.shutdown();
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let server = start_mock_server().await;

        let response = reqwest::get(url(&server, "/index.html")).await.unwrap();
        assert_eq!(response.status().as_u16(), 502);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].is_string());

        server.shutdown();
    }
}
