//! Integration tests for the review service.
//!
//! # Running Tests
//!
//! ```bash
//! # HTTP API tests (in-memory store, no database needed)
//! cargo test -p review-integration-tests
//!
//! # Include the PostgreSQL store tests
//! REVIEW_TEST_DATABASE_URL=postgres://... cargo test -p review-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `review_api` - HTTP status codes, headers, and bodies per endpoint
//! - `postgres_store` - `PgReviewStore` against a live database (ignored by default)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use review_core::{Review, ReviewId};
use review_service::db::{InMemoryReviewStore, ReviewStore};
use review_service::services::ReviewService;
use review_service::state::AppState;

/// Router over a fresh in-memory store, plus direct access to that store.
pub struct TestApp {
    pub store: Arc<InMemoryReviewStore>,
    router: Router,
}

/// A fully buffered HTTP response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    /// A header value as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Create an app over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryReviewStore::new());
        let router = review_service::app(AppState::new(store.clone() as Arc<dyn ReviewStore>));
        Self { store, router }
    }

    /// Service over the same store, for arranging state before a request.
    #[must_use]
    pub fn service(&self) -> ReviewService {
        ReviewService::new(self.store.clone())
    }

    /// Persist a review through the service, returning the stored form.
    ///
    /// # Panics
    ///
    /// Panics if the store fails.
    #[allow(clippy::expect_used)]
    pub async fn seed(&self, review: Review) -> Review {
        self.service()
            .save(review)
            .await
            .expect("seeding the in-memory store failed")
    }

    /// Read a review straight from the store.
    ///
    /// # Panics
    ///
    /// Panics if the store fails.
    #[allow(clippy::expect_used)]
    pub async fn stored(&self, id: &str) -> Option<Review> {
        self.service()
            .find_by_id(&ReviewId::from(id))
            .await
            .expect("reading the in-memory store failed")
    }

    /// Send a request with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    #[allow(clippy::expect_used)]
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        json: Option<&serde_json::Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match json {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("invalid request"))
            .await
            .expect("router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// `POST uri` with a JSON body.
    pub async fn post(&self, uri: &str, json: &serde_json::Value) -> TestResponse {
        self.send(Method::POST, uri, Some(json)).await
    }

    /// `DELETE uri`.
    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
