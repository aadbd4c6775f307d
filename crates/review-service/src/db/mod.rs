//! Review document store.
//!
//! The service talks to storage only through [`ReviewStore`]. Two backends
//! implement it:
//!
//! - [`reviews::PgReviewStore`] - production store in `PostgreSQL`
//! - [`memory::InMemoryReviewStore`] - process-local store for tests and local runs
//!
//! # Database
//!
//! ## Tables
//!
//! - `review.review` - one row per review; entries live in a JSONB array
//!
//! # Migrations
//!
//! Migrations are stored in `crates/review-service/migrations/` and run via:
//! ```bash
//! cargo run -p review-cli -- migrate
//! ```

pub mod memory;
pub mod reviews;

use std::time::Duration;

use async_trait::async_trait;
use review_core::{ProductId, Review, ReviewId};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::InMemoryReviewStore;
pub use reviews::PgReviewStore;

/// Errors raised by a document store.
///
/// The service layer never translates these; they surface as 5xx responses.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Persistence operations for review documents.
///
/// Lookups return `Ok(None)` for missing documents; only store faults are errors.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Fetch a review by primary key.
    async fn get_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError>;

    /// Fetch the review for a product.
    ///
    /// If several reviews share the product, the earliest stored one is returned.
    async fn get_by_product_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Review>, RepositoryError>;

    /// Fetch every review, oldest first.
    async fn get_all(&self) -> Result<Vec<Review>, RepositoryError>;

    /// Insert or replace a review, assigning an id when it has none.
    ///
    /// Returns the review as persisted.
    async fn upsert(&self, review: Review) -> Result<Review, RepositoryError>;

    /// Remove a review. Removing a missing id is not an error.
    async fn delete_by_id(&self, id: &ReviewId) -> Result<(), RepositoryError>;

    /// Verify the store is reachable.
    async fn health_check(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
