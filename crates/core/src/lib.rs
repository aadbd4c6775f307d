//! Review Core - Shared domain types.
//!
//! This crate provides the types used across the review components:
//! - `review-service` - HTTP API over the review document store
//! - `review-cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. Versioning rules live on [`Version`]; everything that
//! touches a store lives in `review-service`.
//!
//! # Modules
//!
//! - [`types`] - Review aggregate, entries, and newtype IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
