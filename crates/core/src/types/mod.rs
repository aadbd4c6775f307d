//! Core types for reviews.

pub mod id;
pub mod review;
pub mod timestamp;
pub mod version;

pub use id::{ProductId, ReviewId};
pub use review::{Review, ReviewEntry};
pub use version::Version;
