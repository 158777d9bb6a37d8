//! Blog post repository (admin side, full CRUD).

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tutorconnect_core::{BlogPost, BlogPostId};

use super::RepositoryError;

/// Field values for creating or updating a post.
#[derive(Debug, Clone)]
pub struct BlogPostFields {
    pub title: String,
    pub body: String,
}

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

const BLOG_COLUMNS: &str = "id, title, body, created_at, updated_at";

/// Repository for blog authoring.
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
        let rows = sqlx::query_as::<_, BlogPostRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blog_post ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a new post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, fields: &BlogPostFields) -> Result<BlogPost, RepositoryError> {
        let row = sqlx::query_as::<_, BlogPostRow>(&format!(
            "INSERT INTO blog_post (title, body)
             VALUES ($1, $2)
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(&fields.title)
        .bind(&fields.body)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update an existing post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the post does not exist.
    pub async fn update(
        &self,
        id: BlogPostId,
        fields: &BlogPostFields,
    ) -> Result<BlogPost, RepositoryError> {
        let row = sqlx::query_as::<_, BlogPostRow>(&format!(
            "UPDATE blog_post
             SET title = $2, body = $3, updated_at = now()
             WHERE id = $1
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(id.as_i64())
        .bind(&fields.title)
        .bind(&fields.body)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), |row| Ok(row.into()))
    }

    /// Delete a post.
    ///
    /// # Returns
    ///
    /// Returns `true` if a post was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: BlogPostId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM blog_post WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
