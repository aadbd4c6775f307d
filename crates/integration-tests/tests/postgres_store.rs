//! `PgReviewStore` tests against a live database.
//!
//! Ignored by default. Run with:
//!
//! ```bash
//! REVIEW_TEST_DATABASE_URL=postgres://... cargo test -p review-integration-tests -- --ignored
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use review_core::{ProductId, Review, ReviewEntry, ReviewId, Version};
use review_service::db::{self, PgReviewStore, ReviewStore};

async fn store() -> PgReviewStore {
    let url = std::env::var("REVIEW_TEST_DATABASE_URL")
        .expect("REVIEW_TEST_DATABASE_URL must be set for postgres tests");
    let pool = db::create_pool(&SecretString::from(url)).await.unwrap();

    sqlx::migrate!("../review-service/migrations")
        .run(&pool)
        .await
        .unwrap();

    PgReviewStore::new(pool)
}

/// Product id unlikely to collide with rows left by earlier runs.
fn fresh_product_id() -> ProductId {
    let nanos = Utc::now().timestamp_subsec_nanos();
    ProductId::new(i32::try_from(nanos % 1_000_000_000).unwrap())
}

/// Entry dates are stored at millisecond precision.
fn now_millis() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(Utc::now().timestamp_millis()).unwrap()
}

#[tokio::test]
#[ignore = "requires REVIEW_TEST_DATABASE_URL"]
async fn test_upsert_get_and_delete_round_trip() {
    let store = store().await;
    let product_id = fresh_product_id();

    let mut review = Review::new(product_id);
    review.version = Version::INITIAL;
    review.append_entry(ReviewEntry::new("a", now_millis(), "first"));
    review.append_entry(ReviewEntry::new("b", now_millis(), "second"));

    let saved = store.upsert(review.clone()).await.unwrap();
    let id = saved.id.clone().unwrap();
    assert_eq!(saved.entries, review.entries);

    assert_eq!(store.get_by_id(&id).await.unwrap(), Some(saved.clone()));
    assert_eq!(
        store.get_by_product_id(product_id).await.unwrap(),
        Some(saved.clone())
    );

    let mut changed = saved.clone();
    changed.version = Version::new(2);
    let updated = store.upsert(changed).await.unwrap();
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.version, Version::new(2));

    store.delete_by_id(&id).await.unwrap();
    assert!(store.get_by_id(&id).await.unwrap().is_none());

    // Deleting again is a no-op
    store.delete_by_id(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires REVIEW_TEST_DATABASE_URL"]
async fn test_missing_lookups_return_none() {
    let store = store().await;

    let missing = ReviewId::from("no-such-review");
    assert!(store.get_by_id(&missing).await.unwrap().is_none());
    assert!(store.health_check().await.is_ok());
}
