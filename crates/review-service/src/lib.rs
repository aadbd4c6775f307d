//! Review Service library.
//!
//! Exposes product reviews over HTTP, backed by a document store with a
//! per-review version counter. The binary in `main.rs` wires configuration,
//! logging, and Sentry around [`app`]; tests drive [`app`] directly.
//!
//! # Architecture
//!
//! ```text
//! routes (HTTP mapping, ETag/Location)
//!   -> services::ReviewService (version-on-write rule)
//!     -> db::ReviewStore (PostgreSQL or in-memory)
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::Router;

use config::StoreBackend;
use db::{InMemoryReviewStore, PgReviewStore, ReviewStore};
use state::AppState;

/// Build the application router with tracing and request ID middleware.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(middleware::http_trace_layer())
        .with_state(state)
}

/// Open the document store selected by configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the `PostgreSQL` pool cannot be created.
pub async fn open_store(backend: &StoreBackend) -> Result<Arc<dyn ReviewStore>, sqlx::Error> {
    match backend {
        StoreBackend::Postgres { database_url } => {
            let pool = db::create_pool(database_url).await?;
            tracing::info!("Database pool created");
            Ok(Arc::new(PgReviewStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory review store; data is lost on restart");
            Ok(Arc::new(InMemoryReviewStore::new()))
        }
    }
}
