//! Blog post repository (site side, read only).
//!
//! Posts are authored in the admin binary; the public site only lists and
//! reads them.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tutorconnect_core::{BlogPost, BlogPostId};

use super::RepositoryError;

/// Database row for the `blog_post` table.
#[derive(Debug, sqlx::FromRow)]
struct BlogPostRow {
    id: i64,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        Self {
            id: BlogPostId::new(row.id),
            title: row.title,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for public blog reads.
pub struct BlogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BlogRepository<'a> {
    /// Create a new blog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<BlogPost>, RepositoryError> {
        let rows = sqlx::query_as::<_, BlogPostRow>(
            "SELECT id, title, body, created_at, updated_at
             FROM blog_post
             ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a single post by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BlogPostId) -> Result<Option<BlogPost>, RepositoryError> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            "SELECT id, title, body, created_at, updated_at
             FROM blog_post
             WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
