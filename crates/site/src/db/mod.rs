//! Database operations for the public site.
//!
//! # Tables
//!
//! - `profile` - Registered parents, tutors, and admins
//! - `parent_request` - Tuition requirements posted by parents
//! - `tutor_profile` - Teaching profiles, at most one per tutor
//! - `contact_unlock` - Callback requests awaiting admin review
//! - `blog_post` - Posts written from the admin panel
//! - `tower_sessions.session` - Cookie session storage
//!
//! # Migrations
//!
//! Migrations live in `crates/site/migrations/` and are applied via:
//! ```bash
//! cargo run -p tutorconnect-cli -- migrate
//! ```
//! They are never applied automatically on server start.

pub mod blog;
pub mod requests;
pub mod tutor_profiles;
pub mod unlocks;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Wrap a row-to-domain conversion failure.
    pub(crate) fn corrupt(context: &str, err: impl std::fmt::Display) -> Self {
        Self::DataCorruption(format!("{context}: {err}"))
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(err)
}
