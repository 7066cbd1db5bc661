//! Book Fair Admin network library
//!
//! Carries API requests to either the in-process mock or the real backend.
//!
//! # Architecture
//!
//! - **Transport**: anything that answers an [`ApiRequest`]; [`HttpTransport`] is the real network
//! - **MockFetch**: wraps a transport and answers `/api/*` from the mock router
//! - **Server**: exposes a transport over HTTP (axum) for external clients
//! - **ApiClient**: typed calls used by the dashboard pages
//!
//! # Usage
//!
//! ```ignore
//! let upstream = HttpTransport::new("http://localhost:8080")?;
//! let fetch = Arc::new(MockFetch::new(MockRouter::seeded(), upstream));
//! let client = ApiClient::new(fetch, "http://localhost:8081/api", "/api");
//!
//! let stalls = client.stalls().await?;
//! ```

pub mod client;
pub mod error;
pub mod interceptor;
pub mod protocol;
pub mod server;
pub mod transport;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use interceptor::{MockFetch, DEFAULT_LATENCY, DEFAULT_PREFIX};
pub use protocol::{ApiRequest, ApiResponse};
pub use server::Server;
pub use transport::{HttpTransport, Transport};

/// Default port for the mock dev server
pub const DEFAULT_PORT: u16 = 8787;
