//! Review service.
//!
//! Thin layer over a [`ReviewStore`] that owns the versioning contract:
//!
//! - [`ReviewService::save`] always persists with [`Version::INITIAL`]
//! - [`ReviewService::update`] persists with the caller's version plus one
//!
//! There is no compare-and-swap against the stored version. Two concurrent
//! read-modify-write sequences on the same review race, and the last upsert
//! wins. Store faults are returned unchanged.

use std::sync::Arc;

use review_core::{ProductId, Review, ReviewEntry, ReviewId, Version};

use crate::db::{RepositoryError, ReviewStore};

/// Review operations shared by all handlers.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn ReviewStore>,
}

impl ReviewService {
    /// Create a service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    /// Find a review by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        tracing::debug!(review_id = %id, "find review by id");
        self.store.get_by_id(id).await
    }

    /// Find the review for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub async fn find_by_product_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Review>, RepositoryError> {
        tracing::debug!(product_id = %product_id, "find review by product id");
        self.store.get_by_product_id(product_id).await
    }

    /// List every review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub async fn find_all(&self) -> Result<Vec<Review>, RepositoryError> {
        self.store.get_all().await
    }

    /// Persist a new review with version 1.
    ///
    /// Any version on the input is discarded. No existence check is made, so
    /// saving a review whose id is already stored resets its version to 1.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub async fn save(&self, mut review: Review) -> Result<Review, RepositoryError> {
        review.version = Version::INITIAL;
        let saved = self.store.upsert(review).await?;
        log_write("saved review", &saved);
        Ok(saved)
    }

    /// Persist a changed review, bumping its version by one.
    ///
    /// `review.version` must be the version the caller read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` without writing if the
    /// version is already `i64::MAX`, or `RepositoryError` if the store fails.
    pub async fn update(&self, mut review: Review) -> Result<Review, RepositoryError> {
        let next = review.version.next().ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "review {} version {} cannot be incremented",
                review.id.as_ref().map_or("<new>", ReviewId::as_str),
                review.version
            ))
        })?;
        review.version = next;
        let updated = self.store.upsert(review).await?;
        log_write("updated review", &updated);
        Ok(updated)
    }

    /// Append an entry to the review for `product_id`.
    ///
    /// Returns `Ok(None)` when the product has no review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub async fn add_entry(
        &self,
        product_id: ProductId,
        entry: ReviewEntry,
    ) -> Result<Option<Review>, RepositoryError> {
        let Some(mut review) = self.find_by_product_id(product_id).await? else {
            return Ok(None);
        };

        review.append_entry(entry);
        self.update(review).await.map(Some)
    }

    /// Delete a review. Deleting a missing id succeeds silently.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    pub async fn delete(&self, id: &ReviewId) -> Result<(), RepositoryError> {
        self.store.delete_by_id(id).await?;
        tracing::info!(review_id = %id, "deleted review");
        Ok(())
    }

    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store is unavailable.
    pub async fn health_check(&self) -> Result<(), RepositoryError> {
        self.store.health_check().await
    }
}

fn log_write(message: &'static str, review: &Review) {
    tracing::info!(
        review_id = review.id.as_ref().map_or("", ReviewId::as_str),
        product_id = %review.product_id,
        version = %review.version,
        entries = review.entries.len(),
        "{message}"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::db::InMemoryReviewStore;

    fn service() -> ReviewService {
        ReviewService::new(Arc::new(InMemoryReviewStore::new()))
    }

    fn entry(username: &str, text: &str) -> ReviewEntry {
        ReviewEntry::new(username, Utc::now(), text)
    }

    /// Store whose every call fails, to check that faults pass through.
    struct FailingStore;

    fn fault() -> RepositoryError {
        RepositoryError::DataCorruption("store offline".to_string())
    }

    #[async_trait]
    impl ReviewStore for FailingStore {
        async fn get_by_id(&self, _: &ReviewId) -> Result<Option<Review>, RepositoryError> {
            Err(fault())
        }

        async fn get_by_product_id(
            &self,
            _: ProductId,
        ) -> Result<Option<Review>, RepositoryError> {
            Err(fault())
        }

        async fn get_all(&self) -> Result<Vec<Review>, RepositoryError> {
            Err(fault())
        }

        async fn upsert(&self, _: Review) -> Result<Review, RepositoryError> {
            Err(fault())
        }

        async fn delete_by_id(&self, _: &ReviewId) -> Result<(), RepositoryError> {
            Err(fault())
        }

        async fn health_check(&self) -> Result<(), RepositoryError> {
            Err(fault())
        }
    }

    #[tokio::test]
    async fn test_save_forces_version_one() {
        let service = service();

        for supplied in [0, 1, 7, -3] {
            let mut review = Review::new(ProductId::new(1));
            review.version = Version::new(supplied);

            let saved = service.save(review).await.unwrap();
            assert_eq!(saved.version, Version::INITIAL);
        }
    }

    #[tokio::test]
    async fn test_save_on_existing_id_resets_version() {
        let service = service();
        let saved = service.save(Review::new(ProductId::new(1))).await.unwrap();
        let updated = service.update(saved).await.unwrap();
        assert_eq!(updated.version, Version::new(2));

        let resaved = service.save(updated).await.unwrap();

        assert_eq!(resaved.version, Version::INITIAL);
    }

    #[tokio::test]
    async fn test_update_increments_supplied_version() {
        let service = service();
        let review = Review::with_id("reviewId", ProductId::new(1), Version::new(4));

        let updated = service.update(review).await.unwrap();

        assert_eq!(updated.version, Version::new(5));
    }

    #[tokio::test]
    async fn test_update_at_max_version_is_rejected_without_writing() {
        let store = Arc::new(InMemoryReviewStore::new());
        let service = ReviewService::new(store.clone());
        let review = Review::with_id("reviewId", ProductId::new(1), Version::new(i64::MAX));

        let result = service.update(review).await;

        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_find_by_id_returns_persisted_review() {
        let service = service();
        let mut review = Review::new(ProductId::new(1));
        review.append_entry(entry("test-user", "Great product"));

        let saved = service.save(review).await.unwrap();
        let id = saved.id.clone().unwrap();
        assert_eq!(service.find_by_id(&id).await.unwrap(), Some(saved.clone()));

        let updated = service.update(saved).await.unwrap();
        assert_eq!(service.find_by_id(&id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let service = service();
        let found = service.find_by_id(&ReviewId::from("1")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_then_find_is_empty() {
        let service = service();
        let saved = service.save(Review::new(ProductId::new(1))).await.unwrap();
        let id = saved.id.unwrap();

        service.delete(&id).await.unwrap();

        assert!(service.find_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_id_succeeds() {
        let service = service();
        assert!(service.delete(&ReviewId::from("reviewId")).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_all() {
        let service = service();
        assert!(service.find_all().await.unwrap().is_empty());

        service.save(Review::new(ProductId::new(1))).await.unwrap();
        service.save(Review::new(ProductId::new(2))).await.unwrap();

        assert_eq!(service.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_entry_appends_and_bumps_version() {
        let service = service();
        let mut review = Review::new(ProductId::new(1));
        review.append_entry(entry("a", "first"));
        let saved = service.save(review).await.unwrap();

        let updated = service
            .add_entry(ProductId::new(1), entry("b", "second"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(Some(updated.version), saved.version.next());
        assert_eq!(updated.entries.len(), saved.entries.len() + 1);
        assert_eq!(updated.entries[0], saved.entries[0]);
        assert_eq!(updated.entries[1].username, "b");
    }

    #[tokio::test]
    async fn test_add_entry_unknown_product() {
        let service = service();
        let result = service
            .add_entry(ProductId::new(99), entry("b", "second"))
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_faults_propagate() {
        let service = ReviewService::new(Arc::new(FailingStore));
        let id = ReviewId::from("reviewId");

        assert!(service.find_by_id(&id).await.is_err());
        assert!(service.find_by_product_id(ProductId::new(1)).await.is_err());
        assert!(service.find_all().await.is_err());
        assert!(service.save(Review::new(ProductId::new(1))).await.is_err());
        assert!(service.update(Review::new(ProductId::new(1))).await.is_err());
        assert!(service.delete(&id).await.is_err());
        assert!(service.health_check().await.is_err());
        assert!(
            service
                .add_entry(ProductId::new(1), entry("a", "b"))
                .await
                .is_err()
        );
    }
}
