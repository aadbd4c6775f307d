//! In-memory review store.
//!
//! Keeps reviews in insertion order behind an async `RwLock`. Used by the
//! test suites and by `REVIEW_STORE=memory` for local runs without a database.

use async_trait::async_trait;
use tokio::sync::RwLock;

use review_core::{ProductId, Review, ReviewId};

use super::{RepositoryError, ReviewStore};

/// Process-local review store.
#[derive(Debug, Default)]
pub struct InMemoryReviewStore {
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryReviewStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reviews.
    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    /// Whether the store holds no reviews.
    pub async fn is_empty(&self) -> bool {
        self.reviews.read().await.is_empty()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn get_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .find(|review| review.id.as_ref() == Some(id))
            .cloned())
    }

    async fn get_by_product_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Review>, RepositoryError> {
        let reviews = self.reviews.read().await;
        let mut matches = reviews
            .iter()
            .filter(|review| review.product_id == product_id);

        let first = matches.next().cloned();
        if matches.next().is_some() {
            tracing::warn!(
                product_id = %product_id,
                "multiple reviews share a product id; returning the oldest"
            );
        }
        Ok(first)
    }

    async fn get_all(&self) -> Result<Vec<Review>, RepositoryError> {
        Ok(self.reviews.read().await.clone())
    }

    async fn upsert(&self, mut review: Review) -> Result<Review, RepositoryError> {
        let id = review.id.get_or_insert_with(ReviewId::generate).clone();

        let mut reviews = self.reviews.write().await;
        match reviews
            .iter_mut()
            .find(|stored| stored.id.as_ref() == Some(&id))
        {
            Some(stored) => stored.clone_from(&review),
            None => reviews.push(review.clone()),
        }

        Ok(review)
    }

    async fn delete_by_id(&self, id: &ReviewId) -> Result<(), RepositoryError> {
        self.reviews
            .write()
            .await
            .retain(|review| review.id.as_ref() != Some(id));
        Ok(())
    }
}
