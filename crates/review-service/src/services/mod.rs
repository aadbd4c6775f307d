//! Business logic services.
//!
//! # Services
//!
//! - `reviews` - Review lookups and the version-on-write rule

pub mod reviews;

pub use reviews::ReviewService;
