//! Typed client for the book fair REST API
//!
//! Auth calls go to the real backend base URL. Resource calls go to the
//! resource base, which is the mock prefix during development and the
//! backend base otherwise. Non-success responses become [`Error::Status`].

use std::sync::Arc;

use bookfair_core::{
    Business, BusinessDraft, Dashboard, LoginRequest, LoginResponse, Method, Profile,
    ProfileUpdate, Reservation, ReservationAction, Stall, StallAssignment, Vendor, VendorDraft,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::protocol::ApiRequest;
use crate::transport::Transport;

/// API client handle
pub struct ApiClient<T> {
    transport: Arc<T>,
    auth_base: String,
    resource_base: String,
    token: Option<String>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            auth_base: self.auth_base.clone(),
            resource_base: self.resource_base.clone(),
            token: self.token.clone(),
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(
        transport: Arc<T>,
        auth_base: impl Into<String>,
        resource_base: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            auth_base: trim_base(auth_base.into()),
            resource_base: trim_base(resource_base.into()),
            token: None,
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn resource_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.resource_base, endpoint)
    }

    fn request(&self, method: Method, url: String) -> ApiRequest {
        let request = ApiRequest::new(method, url).header("Content-Type", "application/json");
        match &self.token {
            Some(token) => request.bearer(token),
            None => request,
        }
    }

    async fn execute<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        debug!(method = %request.method, url = %request.url, "API request");
        let response = self.transport.send(request).await?.error_for_status()?;
        response.parse()
    }

    async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R> {
        let request = self.request(Method::Get, self.resource_url(endpoint));
        self.execute(request).await
    }

    async fn send_json<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<R> {
        let mut request = self.request(method, self.resource_url(endpoint));
        request.body = Some(serde_json::to_string(body)?);
        self.execute(request).await
    }

    /// Authenticate against the real backend
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let mut request = self.request(Method::Post, format!("{}/auth/login", self.auth_base));
        request.body = Some(serde_json::to_string(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?);
        self.execute(request).await
    }

    pub async fn profile(&self) -> Result<Profile> {
        self.get("/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        self.send_json(Method::Put, "/profile", update).await
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        self.get("/dashboard").await
    }

    pub async fn stalls(&self) -> Result<Vec<Stall>> {
        self.get("/stalls").await
    }

    pub async fn assign_stall(&self, stall_id: &str, vendor_id: &str) -> Result<Stall> {
        let body = StallAssignment {
            vendor_id: Some(vendor_id.to_string()),
        };
        self.send_json(Method::Post, &format!("/stalls/{}/assign", stall_id), &body)
            .await
    }

    pub async fn reservations(&self) -> Result<Vec<Reservation>> {
        self.get("/reservations").await
    }

    pub async fn decide_reservation(
        &self,
        reservation_id: &str,
        action: ReservationAction,
    ) -> Result<Reservation> {
        let endpoint = format!("/reservations/{}/{}", reservation_id, action.token());
        self.send_json(Method::Post, &endpoint, &serde_json::json!({}))
            .await
    }

    pub async fn approve_reservation(&self, reservation_id: &str) -> Result<Reservation> {
        self.decide_reservation(reservation_id, ReservationAction::Approve)
            .await
    }

    pub async fn decline_reservation(&self, reservation_id: &str) -> Result<Reservation> {
        self.decide_reservation(reservation_id, ReservationAction::Decline)
            .await
    }

    pub async fn vendors(&self) -> Result<Vec<Vendor>> {
        self.get("/vendors").await
    }

    pub async fn create_vendor(&self, draft: &VendorDraft) -> Result<Vendor> {
        self.send_json(Method::Post, "/vendors", draft).await
    }

    pub async fn businesses(&self) -> Result<Vec<Business>> {
        self.get("/business/all").await
    }

    pub async fn create_business(&self, draft: &BusinessDraft) -> Result<Business> {
        self.send_json(Method::Post, "/business", draft).await
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::interceptor::MockFetch;
    use crate::protocol::ApiResponse;
    use bookfair_core::{MockRouter, ReservationStatus, StallList, StallStatus};
    use std::time::Duration;

    /// Stands in for the real backend: only knows `/auth/login`
    struct FakeBackend;

    impl Transport for FakeBackend {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            if request.url.ends_with("/auth/login") {
                let body = serde_json::json!({
                    "token": "jwt-token",
                    "user": {
                        "userId": 3,
                        "name": "Nimal Perera",
                        "email": "nimal@bookfair.lk",
                        "contactNumber": "0771111111",
                        "role": "admin"
                    }
                });
                return Ok(ApiResponse::json(200, &body));
            }
            Ok(ApiResponse::json(
                404,
                &serde_json::json!({ "message": "Not found" }),
            ))
        }
    }

    fn client() -> ApiClient<MockFetch<FakeBackend>> {
        let fetch = MockFetch::new(MockRouter::seeded(), FakeBackend).with_latency(Duration::ZERO);
        ApiClient::new(Arc::new(fetch), "http://localhost:8081/api/", "/api")
    }

    #[tokio::test]
    async fn test_login_goes_to_backend() {
        let client = client();
        let login = client.login("nimal@bookfair.lk", "secret").await.unwrap();
        assert_eq!(login.token, "jwt-token");
        assert_eq!(login.user.user_id, 3);
    }

    #[tokio::test]
    async fn test_resource_calls_hit_mock() {
        let client = client();

        let stall = client.assign_stall("A02", "V001").await.unwrap();
        assert_eq!(stall.status, StallStatus::Reserved);
        assert_eq!(stall.publisher.as_deref(), Some("Sarasavi Bookshop"));

        let reservation = client.approve_reservation("R002").await.unwrap();
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert!(reservation.email_sent);

        let vendor = client
            .create_vendor(&VendorDraft {
                name: Some("Godage".to_string()),
                stalls: Some(StallList::List(vec!["C20".to_string()])),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(vendor.id, "V003");
        assert_eq!(client.vendors().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_error_status_carries_message() {
        let client = client();
        let err = client.assign_stall("ZZZ", "V001").await.unwrap_err();
        match err {
            Error::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Stall not found");
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_profile_update_roundtrip() {
        let client = client();
        let updated = client
            .update_profile(&ProfileUpdate {
                address: Some("Kandy".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.address, "Kandy");
        assert_eq!(client.profile().await.unwrap().address, "Kandy");
    }
}
