//! HTTP route handlers for the review service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                     - Liveness check
//! GET    /health/ready               - Readiness check (store reachable)
//!
//! # Reviews
//! GET    /review/{id}                - Single review (ETag + Location)
//! POST   /review                     - Create review at version 1 (201)
//! POST   /review/{productId}/entry   - Append entry to a product's review
//! DELETE /review/{id}                - Delete review (404 if absent)
//! GET    /reviews                    - All reviews
//! GET    /reviews?productId={p}      - Review for a product, as an array
//! ```

pub mod reviews;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the review resource routes router.
///
/// The entry route's `{id}` segment carries a product id; the router requires
/// one parameter name per segment position.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/review", post(reviews::create))
        .route("/review/{id}", get(reviews::show).delete(reviews::delete))
        .route("/review/{id}/entry", post(reviews::add_entry))
        .route("/reviews", get(reviews::index))
        // Older clients call the listing with a trailing slash
        .route("/reviews/", get(reviews::index))
}

/// Create all routes for the review service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(review_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the document store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.reviews().health_check().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
