//! Database migration command.
//!
//! Applies the migrations embedded from `crates/site/migrations` to the
//! database named by `DATABASE_URL`. Both binaries share that schema, so
//! there is a single migration stream.

use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration
/// fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| MigrationError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../site/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
