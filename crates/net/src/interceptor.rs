//! Mock interception layer
//!
//! [`MockFetch`] wraps a real transport. Requests whose URL begins with the
//! reserved prefix are answered by the [`MockRouter`] after an artificial
//! latency; everything else goes to the wrapped transport untouched.

use std::sync::Arc;
use std::time::Duration;

use bookfair_core::{MockRouter, User};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::protocol::{ApiRequest, ApiResponse};
use crate::transport::Transport;

/// URL prefix owned by the mock
pub const DEFAULT_PREFIX: &str = "/api/";

/// Artificial latency applied to every owned request
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(150);

/// Transport wrapper that serves the mock API in-process
pub struct MockFetch<T> {
    router: Arc<RwLock<MockRouter>>,
    inner: T,
    prefix: String,
    latency: Duration,
}

impl<T: Transport> MockFetch<T> {
    pub fn new(router: MockRouter, inner: T) -> Self {
        Self {
            router: Arc::new(RwLock::new(router)),
            inner,
            prefix: DEFAULT_PREFIX.to_string(),
            latency: DEFAULT_LATENCY,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Shared handle on the router, for inspection and seeding
    pub fn router(&self) -> Arc<RwLock<MockRouter>> {
        self.router.clone()
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Auth side channel: keep `GET profile` in step with login state
    pub async fn set_authenticated_user(&self, user: Option<User>) {
        self.router.write().await.set_authenticated_user(user);
    }

    /// Route path for an owned URL, with query string and fragment removed
    pub fn owned_path<'a>(&self, url: &'a str) -> Option<&'a str> {
        let rest = url.strip_prefix(self.prefix.as_str())?;
        let end = rest.find(['?', '#']).unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

impl<T: Transport> Transport for MockFetch<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let Some(path) = self.owned_path(&request.url).map(str::to_string) else {
            return self.inner.send(request).await;
        };

        tokio::time::sleep(self.latency).await;

        let reply = self
            .router
            .write()
            .await
            .handle(&request.method, &path, request.body.as_deref());
        debug!(method = %request.method, path = %path, status = reply.status, "Mock response");

        Ok(ApiResponse::from(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookfair_core::{Method, UserRole};
    use std::sync::Mutex;
    use std::time::Instant;

    /// Records forwarded requests and answers with a fixed response
    #[derive(Default)]
    struct RecordingTransport {
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(ApiResponse {
                status: 418,
                headers: vec![("X-Upstream".to_string(), "yes".to_string())],
                body: b"\x00raw bytes".to_vec(),
            })
        }
    }

    fn mock() -> MockFetch<RecordingTransport> {
        MockFetch::new(MockRouter::seeded(), RecordingTransport::default())
            .with_latency(Duration::ZERO)
    }

    #[test]
    fn test_owned_path_strips_query_and_fragment() {
        let fetch = mock();
        assert_eq!(fetch.owned_path("/api/stalls?floor=1"), Some("stalls"));
        assert_eq!(fetch.owned_path("/api/profile#top"), Some("profile"));
        assert_eq!(fetch.owned_path("/api/business/all"), Some("business/all"));
        assert_eq!(fetch.owned_path("/apix/stalls"), None);
        assert_eq!(fetch.owned_path("http://localhost:8081/api/stalls"), None);
    }

    #[tokio::test]
    async fn test_unowned_requests_pass_through_unchanged() {
        let fetch = mock();
        let request = ApiRequest::post("http://localhost:8081/api/auth/login")
            .header("Authorization", "Bearer t")
            .body("{\"email\":\"a\"}");

        let response = fetch.send(request.clone()).await.unwrap();

        assert_eq!(response.status, 418);
        assert_eq!(response.body, b"\x00raw bytes".to_vec());
        assert_eq!(response.header("x-upstream"), Some("yes"));
        assert_eq!(*fetch.inner().seen.lock().unwrap(), vec![request]);
    }

    #[tokio::test]
    async fn test_owned_requests_never_reach_inner() {
        let fetch = mock();
        let response = fetch.send(ApiRequest::get("/api/stalls")).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(fetch.inner().seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_business_create_visible_on_refetch() {
        let fetch = mock();
        let created = fetch
            .send(
                ApiRequest::post("/api/business")
                    .body(r#"{"name":"Acme","contactNumber":"123"}"#),
            )
            .await
            .unwrap();
        assert_eq!(created.status, 201);
        let business: serde_json::Value = created.parse().unwrap();
        assert_eq!(business["businessId"], 3);

        let list: Vec<serde_json::Value> = fetch
            .send(ApiRequest::get("/api/business/all"))
            .await
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(list.len(), 3);
    }

    #[tokio::test]
    async fn test_side_channel_switches_profile() {
        let fetch = mock();
        fetch
            .set_authenticated_user(Some(User {
                user_id: 12,
                name: "Amaya Fernando".to_string(),
                email: "amaya@bookfair.lk".to_string(),
                contact_number: String::new(),
                role: UserRole::Admin,
                created_at: None,
                genres: None,
            }))
            .await;

        let profile: serde_json::Value = fetch
            .send(ApiRequest::get("/api/profile"))
            .await
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(profile["employeeId"], "CMBF012");
        assert_eq!(profile["phone"], "N/A");

        fetch.set_authenticated_user(None).await;
        let profile: serde_json::Value = fetch
            .send(ApiRequest::get("/api/profile"))
            .await
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(profile["employeeId"], "CMBF001");
    }

    #[tokio::test]
    async fn test_owned_request_waits_for_latency() {
        let fetch = MockFetch::new(MockRouter::seeded(), RecordingTransport::default());
        let started = Instant::now();

        let response = fetch
            .send(ApiRequest::new(Method::Get, "/api/dashboard"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert!(started.elapsed() >= DEFAULT_LATENCY);
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let fetch = mock().with_prefix("/mock/");
        let response = fetch.send(ApiRequest::get("/mock/vendors")).await.unwrap();
        assert_eq!(response.status, 200);

        let response = fetch.send(ApiRequest::get("/api/vendors")).await.unwrap();
        assert_eq!(response.status, 418);
    }
}
