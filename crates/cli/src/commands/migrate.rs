//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! review-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `REVIEW_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Embedded at build time from `crates/review-service/migrations/`.

use thiserror::Error;
use tracing::info;

use review_service::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run review database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing, the database is unreachable,
/// or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let database_url =
        super::database_url().ok_or(MigrationError::MissingEnvVar("REVIEW_DATABASE_URL"))?;

    info!("Connecting to review database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running review migrations...");
    sqlx::migrate!("../review-service/migrations")
        .run(&pool)
        .await?;

    info!("Review migrations complete!");
    Ok(())
}
