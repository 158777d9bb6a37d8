//! Contact unlock repository (site side).
//!
//! The site only ever creates unlocks and reads them back; status changes
//! happen in the admin binary. Rows are never deleted.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tutorconnect_core::{ContactUnlock, RequestId, UnlockId, UnlockStatus, UserId};

use super::RepositoryError;

/// Database row for the `contact_unlock` table.
#[derive(Debug, sqlx::FromRow)]
struct UnlockRow {
    id: i64,
    tutor_id: i64,
    parent_id: i64,
    request_id: i64,
    status: UnlockStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UnlockRow> for ContactUnlock {
    fn from(row: UnlockRow) -> Self {
        Self {
            id: UnlockId::new(row.id),
            tutor_id: UserId::new(row.tutor_id),
            parent_id: UserId::new(row.parent_id),
            request_id: RequestId::new(row.request_id),
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const UNLOCK_COLUMNS: &str =
    "id, tutor_id, parent_id, request_id, status, created_at, updated_at";

/// Repository for contact unlock database operations.
pub struct UnlockRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UnlockRepository<'a> {
    /// Create a new unlock repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a tutor's callback request for a matched parent request.
    ///
    /// Idempotent: a partial unique index on `(tutor_id, request_id)` for
    /// non-denied rows absorbs duplicate submissions (including two racing
    /// ones); when the insert is a no-op the existing row is returned. A
    /// previously denied unlock does not block a fresh request.
    ///
    /// # Returns
    ///
    /// The unlock row and whether this call created it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statements fail.
    pub async fn request_callback(
        &self,
        tutor_id: UserId,
        parent_id: UserId,
        request_id: RequestId,
    ) -> Result<(ContactUnlock, bool), RepositoryError> {
        let inserted = sqlx::query_as::<_, UnlockRow>(&format!(
            "INSERT INTO contact_unlock (tutor_id, parent_id, request_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (tutor_id, request_id) WHERE status <> 'denied' DO NOTHING
             RETURNING {UNLOCK_COLUMNS}"
        ))
        .bind(tutor_id.as_i64())
        .bind(parent_id.as_i64())
        .bind(request_id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok((row.into(), true));
        }

        // The insert hit the unique index; fetch the live row it collided with.
        let existing = sqlx::query_as::<_, UnlockRow>(&format!(
            "SELECT {UNLOCK_COLUMNS} FROM contact_unlock
             WHERE tutor_id = $1 AND request_id = $2 AND status <> 'denied'"
        ))
        .bind(tutor_id.as_i64())
        .bind(request_id.as_i64())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok((existing.into(), false))
    }

    /// List all of a tutor's unlocks, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_tutor(
        &self,
        tutor_id: UserId,
    ) -> Result<Vec<ContactUnlock>, RepositoryError> {
        let rows = sqlx::query_as::<_, UnlockRow>(&format!(
            "SELECT {UNLOCK_COLUMNS} FROM contact_unlock
             WHERE tutor_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(tutor_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
