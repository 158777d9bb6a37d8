//! Database operations for the admin panel.
//!
//! Shares the site's database; the admin binary is the only writer of
//! unlock status transitions and blog posts.

pub mod blog;
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

    /// The entity exists but is not in a state that allows the operation
    /// (e.g., settling an unlock twice).
    #[error("conflict: {0}")]
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
