//! Transports that carry API requests
//!
//! [`Transport`] is the seam the mock interceptor wraps. [`HttpTransport`]
//! is the real network path, backed by reqwest.

use std::future::Future;
use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::{ApiRequest, ApiResponse};

/// Default request timeout for the real transport
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Request headers the HTTP client manages itself
const HOP_HEADERS: [&str; 4] = ["host", "content-length", "connection", "transfer-encoding"];

/// Something that can answer an [`ApiRequest`]
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send {
        (**self).send(request)
    }
}

/// Real network transport.
///
/// Relative URLs are resolved against `origin`, the way a browser resolves
/// them against the page origin.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: HttpClient,
    origin: Url,
}

impl HttpTransport {
    pub fn new(origin: &str) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            origin: Url::parse(origin)?,
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve a request URL against the origin
    pub fn resolve(&self, url: &str) -> Result<Url> {
        Ok(self.origin.join(url)?)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.resolve(&request.url)?;
        debug!(method = %request.method, url = %url, "Forwarding request");
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|e| Error::Protocol(format!("Invalid method: {}", e)))?;

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            if HOP_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(status, bytes = body.len(), "Upstream response received");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
