//! Review aggregate and its entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, ReviewId};
use super::version::Version;

/// One user's dated comment within a [`Review`].
///
/// Entries are immutable once appended; equality is structural over all fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// Name of the user who wrote the entry.
    pub username: String,
    /// When the entry was written.
    #[serde(with = "crate::types::timestamp")]
    pub date: DateTime<Utc>,
    /// The textual review content.
    pub review: String,
}

impl ReviewEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(username: impl Into<String>, date: DateTime<Utc>, review: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            date,
            review: review.into(),
        }
    }
}

/// All feedback collected for one product.
///
/// `id` is `None` until the review is first persisted. `entries` keeps append
/// order and is never reordered or shortened.
///
/// # JSON
///
/// ```json
/// { "id": "6f1c...", "productId": 1, "version": 1, "entries": [] }
/// ```
///
/// `id`, `version` and `entries` may be omitted on input; `id` is always
/// written on output (`null` when absent).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Store-assigned primary key.
    #[serde(default)]
    pub id: Option<ReviewId>,
    /// Product this review belongs to.
    pub product_id: ProductId,
    /// Write counter, also served as the `ETag`.
    #[serde(default)]
    pub version: Version,
    /// Entries in append order.
    #[serde(default)]
    pub entries: Vec<ReviewEntry>,
}

impl Review {
    /// A review for `product_id` that has not been stored yet.
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self {
            id: None,
            product_id,
            version: Version::new(0),
            entries: Vec::new(),
        }
    }

    /// A review with a known id and version and no entries.
    #[must_use]
    pub fn with_id(id: impl Into<ReviewId>, product_id: ProductId, version: Version) -> Self {
        Self {
            id: Some(id.into()),
            product_id,
            version,
            entries: Vec::new(),
        }
    }

    /// Append an entry after all existing ones.
    pub fn append_entry(&mut self, entry: ReviewEntry) {
        self.entries.push(entry);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_equality_is_structural() {
        let a = ReviewEntry::new("test-user", at(8), "Great product");
        let b = ReviewEntry::new("test-user", at(8), "Great product");
        assert_eq!(a, b);

        assert_ne!(a, ReviewEntry::new("other-user", at(8), "Great product"));
        assert_ne!(a, ReviewEntry::new("test-user", at(9), "Great product"));
        assert_ne!(a, ReviewEntry::new("test-user", at(8), "Meh"));
    }

    #[test]
    fn test_review_equality_covers_entry_order() {
        let first = ReviewEntry::new("a", at(8), "one");
        let second = ReviewEntry::new("b", at(9), "two");

        let mut left = Review::with_id("reviewId", ProductId::new(1), Version::INITIAL);
        left.append_entry(first.clone());
        left.append_entry(second.clone());

        let mut right = Review::with_id("reviewId", ProductId::new(1), Version::INITIAL);
        right.append_entry(first.clone());
        right.append_entry(second.clone());
        assert_eq!(left, right);

        let mut swapped = Review::with_id("reviewId", ProductId::new(1), Version::INITIAL);
        swapped.append_entry(second);
        swapped.append_entry(first);
        assert_ne!(left, swapped);
    }

    #[test]
    fn test_review_equality_covers_version_and_id() {
        let base = Review::with_id("reviewId", ProductId::new(1), Version::INITIAL);
        assert_ne!(
            base,
            Review::with_id("reviewId", ProductId::new(1), Version::new(2))
        );
        assert_ne!(
            base,
            Review::with_id("otherId", ProductId::new(1), Version::INITIAL)
        );
    }

    #[test]
    fn test_append_preserves_order() {
        let mut review = Review::new(ProductId::new(1));
        assert!(review.entries.is_empty());

        review.append_entry(ReviewEntry::new("a", at(8), "first"));
        review.append_entry(ReviewEntry::new("b", at(9), "second"));

        let names: Vec<_> = review.entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_serializes_camel_case_with_null_id() {
        let mut review = Review::new(ProductId::new(7));
        review.append_entry(ReviewEntry::new("test-user", at(8), "Great product"));

        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(
            value,
            json!({
                "id": null,
                "productId": 7,
                "version": 0,
                "entries": [{
                    "username": "test-user",
                    "date": "2026-10-17T08:00:00.000Z",
                    "review": "Great product"
                }]
            })
        );
    }

    #[test]
    fn test_deserializes_minimal_body() {
        let review: Review = serde_json::from_value(json!({ "productId": 3 })).unwrap();
        assert_eq!(review, Review::new(ProductId::new(3)));
    }

    #[test]
    fn test_deserialize_requires_product_id() {
        let result = serde_json::from_value::<Review>(json!({ "entries": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_deserializes_compact_offset_dates() {
        let entry: ReviewEntry = serde_json::from_value(json!({
            "username": "b",
            "date": "2026-10-17T08:00:00.000+0000",
            "review": "r2"
        }))
        .unwrap();
        assert_eq!(entry.date, at(8));
    }

    #[test]
    fn test_accepts_values_without_validation() {
        let review: Review = serde_json::from_value(json!({
            "productId": -5,
            "version": 99,
            "entries": [{ "username": "", "date": "2026-10-17T08:00:00Z", "review": "" }]
        }))
        .unwrap();
        assert_eq!(review.product_id.as_i32(), -5);
        assert_eq!(review.version, Version::new(99));
        assert_eq!(review.entries.len(), 1);
    }
}
