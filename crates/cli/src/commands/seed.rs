//! Seed the database with a review.
//!
//! Goes through `ReviewService::save`, so the review starts at version 1 just
//! as if it had been posted to `POST /review`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use review_core::{ProductId, Review, ReviewEntry};
use review_service::db::{self, PgReviewStore};
use review_service::services::ReviewService;

/// Create a review for `product_id` holding one entry dated now.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the store fails.
pub async fn create_review(
    product_id: i32,
    username: &str,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url().ok_or("REVIEW_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let service = ReviewService::new(Arc::new(PgReviewStore::new(pool)));

    let product_id = ProductId::new(product_id);
    if let Some(existing) = service.find_by_product_id(product_id).await? {
        tracing::warn!(
            product_id = %product_id,
            review_id = ?existing.id,
            "Product already has a review; the new one will not be returned by product lookups"
        );
    }

    let saved = service
        .save(first_review(product_id, username, text, Utc::now()))
        .await?;
    info!(
        review_id = ?saved.id,
        product_id = %saved.product_id,
        version = %saved.version,
        "Review created"
    );

    Ok(())
}

/// A new, unsaved review holding a single entry.
fn first_review(product_id: ProductId, username: &str, text: &str, date: DateTime<Utc>) -> Review {
    let mut review = Review::new(product_id);
    review.append_entry(ReviewEntry::new(username, date, text));
    review
}
