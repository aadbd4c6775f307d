//! `PostgreSQL` review store.
//!
//! Each review is one row of `review.review`. The entry list is stored as a
//! JSONB array so a review reads and writes as a single document.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use review_core::{ProductId, Review, ReviewEntry, ReviewId, Version};

use super::{RepositoryError, ReviewStore};

/// Row shape of `review.review`.
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: String,
    product_id: ProductId,
    version: Version,
    entries: Json<Vec<ReviewEntry>>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: Some(ReviewId::from(row.id)),
            product_id: row.product_id,
            version: row.version,
            entries: row.entries.0,
        }
    }
}

/// Review store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn get_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT id, product_id, version, entries
            FROM review.review
            WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Review::from))
    }

    async fn get_by_product_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Review>, RepositoryError> {
        // Fetch two rows so duplicates can be reported without a second query.
        let mut rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT id, product_id, version, entries
            FROM review.review
            WHERE product_id = $1
            ORDER BY created_at, id
            LIMIT 2
            ",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > 1 {
            tracing::warn!(
                product_id = %product_id,
                "multiple reviews share a product id; returning the oldest"
            );
        }

        rows.truncate(1);
        Ok(rows.pop().map(Review::from))
    }

    async fn get_all(&self) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT id, product_id, version, entries
            FROM review.review
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn upsert(&self, review: Review) -> Result<Review, RepositoryError> {
        let id = review.id.clone().unwrap_or_else(ReviewId::generate);

        let row = sqlx::query_as::<_, ReviewRow>(
            r"
            INSERT INTO review.review (id, product_id, version, entries)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET product_id = EXCLUDED.product_id,
                version = EXCLUDED.version,
                entries = EXCLUDED.entries,
                updated_at = NOW()
            RETURNING id, product_id, version, entries
            ",
        )
        .bind(id.as_str())
        .bind(review.product_id)
        .bind(review.version)
        .bind(Json(&review.entries))
        .fetch_one(&self.pool)
        .await?;

        if row.id != id.as_str() {
            return Err(RepositoryError::DataCorruption(format!(
                "upsert of review {id} returned row {}",
                row.id
            )));
        }

        Ok(row.into())
    }

    async fn delete_by_id(&self, id: &ReviewId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM review.review WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
