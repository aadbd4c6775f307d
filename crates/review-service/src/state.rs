//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::ReviewStore;
use crate::services::ReviewService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds no per-request mutable data; all review
/// state lives in the document store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    reviews: ReviewService,
}

impl AppState {
    /// Create a new application state over a document store.
    #[must_use]
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                reviews: ReviewService::new(store),
            }),
        }
    }

    /// Get a reference to the review service.
    #[must_use]
    pub fn reviews(&self) -> &ReviewService {
        &self.inner.reviews
    }
}
