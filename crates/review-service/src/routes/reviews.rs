//! Review resource handlers.
//!
//! Single-review responses carry two headers:
//!
//! - `ETag` - the review version as a quoted decimal (`"3"`)
//! - `Location` - the canonical path `/review/{id}`, with the id
//!   percent-encoded as a single path segment
//!
//! Collection responses carry neither.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use review_core::{ProductId, Review, ReviewEntry, ReviewId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for `GET /reviews`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Restrict the listing to the review for this product.
    pub product_id: Option<ProductId>,
}

/// `GET /review/{id}` - fetch one review.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no review has this id.
pub async fn show(State(state): State<AppState>, Path(id): Path<ReviewId>) -> Result<Response> {
    let review = state
        .reviews()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("review {id}")))?;

    review_response(StatusCode::OK, review)
}

/// `GET /reviews[?productId=N]` - list reviews.
///
/// With `productId`, the array holds the product's review or is empty.
///
/// # Errors
///
/// Returns `AppError::Database` if the store fails.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Review>>> {
    let reviews = match query.product_id {
        Some(product_id) => state
            .reviews()
            .find_by_product_id(product_id)
            .await?
            .into_iter()
            .collect(),
        None => state.reviews().find_all().await?,
    };

    Ok(Json(reviews))
}

/// `POST /review` - create a review at version 1.
///
/// # Errors
///
/// Returns `AppError::Database` if the store fails.
pub async fn create(State(state): State<AppState>, Json(review): Json<Review>) -> Result<Response> {
    let saved = state.reviews().save(review).await?;
    review_response(StatusCode::CREATED, saved)
}

/// `POST /review/{productId}/entry` - append an entry to a product's review.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product has no review.
pub async fn add_entry(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Json(entry): Json<ReviewEntry>,
) -> Result<Response> {
    let updated = state
        .reviews()
        .add_entry(product_id, entry)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("review for product {product_id}")))?;

    review_response(StatusCode::OK, updated)
}

/// `DELETE /review/{id}` - remove a review.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the review did not exist before the call.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<StatusCode> {
    if state.reviews().find_by_id(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("review {id}")));
    }

    state.reviews().delete(&id).await?;
    Ok(StatusCode::OK)
}

/// Canonical path of a single review.
///
/// The id is percent-encoded, so any stored id yields a valid header that
/// routes back to `GET /review/{id}`.
#[must_use]
pub fn location(id: &ReviewId) -> String {
    format!("/review/{}", urlencoding::encode(id.as_str()))
}

/// JSON body plus `ETag` and `Location` headers.
fn review_response(status: StatusCode, review: Review) -> Result<Response> {
    let id = review
        .id
        .as_ref()
        .ok_or_else(|| AppError::Internal("persisted review has no id".to_string()))?;

    let location = HeaderValue::from_str(&location(id))
        .map_err(|e| AppError::Internal(format!("review id {id} is not a valid header: {e}")))?;
    let etag = HeaderValue::from_str(&review.version.etag())
        .map_err(|e| AppError::Internal(format!("invalid etag: {e}")))?;

    Ok((
        status,
        [(header::ETAG, etag), (header::LOCATION, location)],
        Json(review),
    )
        .into_response())
}
