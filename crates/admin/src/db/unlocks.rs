//! Contact unlock queue and transitions (admin side).
//!
//! The pending queue mirrors what reviewers see: each unlock joined with
//! the tutor, the parent (full contact - reviewers vet who they are
//! connecting), and the underlying request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use tutorconnect_core::{
    Board, ClassLevel, ContactUnlock, Email, ParentRequest, Phone, RequestId, UnlockId,
    UnlockStatus, UserId,
};

use super::RepositoryError;

/// The person on either side of an unlock, as shown to reviewers.
#[derive(Debug, Clone, Serialize)]
pub struct PartySummary {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: Phone,
}

/// One entry in the pending review queue.
#[derive(Debug, Clone, Serialize)]
pub struct UnlockQueueItem {
    pub unlock: ContactUnlock,
    pub tutor: PartySummary,
    pub parent: PartySummary,
    pub request: ParentRequest,
}

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

/// Repository for unlock review operations.
pub struct UnlockRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UnlockRepository<'a> {
    /// Create a new unlock repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the pending queue, oldest first, with joined detail.
    ///
    /// Oldest first because reviewers work the queue in arrival order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if joined data is invalid.
    pub async fn list_pending(&self) -> Result<Vec<UnlockQueueItem>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct QueueRow {
            #[sqlx(flatten)]
            unlock: UnlockRow,
            tutor_name: String,
            tutor_email: String,
            tutor_phone: String,
            parent_name: String,
            parent_email: String,
            parent_phone: String,
            student_name: Option<String>,
            board: Board,
            class: i16,
            subjects: Vec<String>,
            locality: String,
            preferred_timings: String,
            request_created_at: DateTime<Utc>,
            request_updated_at: DateTime<Utc>,
        }

        let rows = sqlx::query_as::<_, QueueRow>(
            "SELECT u.id, u.tutor_id, u.parent_id, u.request_id, u.status,
                    u.created_at, u.updated_at,
                    t.name AS tutor_name, t.email AS tutor_email, t.phone AS tutor_phone,
                    p.name AS parent_name, p.email AS parent_email, p.phone AS parent_phone,
                    r.student_name, r.board, r.class, r.subjects, r.locality,
                    r.preferred_timings,
                    r.created_at AS request_created_at, r.updated_at AS request_updated_at
             FROM contact_unlock u
             JOIN profile t ON t.id = u.tutor_id
             JOIN profile p ON p.id = u.parent_id
             JOIN parent_request r ON r.id = u.request_id
             WHERE u.status = 'pending'
             ORDER BY u.created_at ASC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let tutor = party(row.unlock.tutor_id, row.tutor_name, &row.tutor_email, &row.tutor_phone)?;
                let parent = party(row.unlock.parent_id, row.parent_name, &row.parent_email, &row.parent_phone)?;
                let class = ClassLevel::try_from(row.class)
                    .map_err(|e| RepositoryError::corrupt("invalid class in database", e))?;

                let request = ParentRequest {
                    id: RequestId::new(row.unlock.request_id),
                    parent_id: UserId::new(row.unlock.parent_id),
                    student_name: row.student_name,
                    board: row.board,
                    class,
                    subjects: row.subjects,
                    locality: row.locality,
                    preferred_timings: row.preferred_timings,
                    created_at: row.request_created_at,
                    updated_at: row.request_updated_at,
                };

                Ok(UnlockQueueItem {
                    unlock: row.unlock.into(),
                    tutor,
                    parent,
                    request,
                })
            })
            .collect()
    }

    /// Settle a pending unlock.
    ///
    /// The `status = 'pending'` guard makes the transition single-shot
    /// even under concurrent reviewer clicks: the second click affects
    /// zero rows and surfaces as a conflict.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the unlock is already settled.
    /// Returns `RepositoryError::NotFound` if it does not exist.
    pub async fn settle(
        &self,
        id: UnlockId,
        decision: UnlockStatus,
    ) -> Result<ContactUnlock, RepositoryError> {
        let updated = sqlx::query_as::<_, UnlockRow>(&format!(
            "UPDATE contact_unlock
             SET status = $2, updated_at = now()
             WHERE id = $1 AND status = 'pending'
             RETURNING {UNLOCK_COLUMNS}"
        ))
        .bind(id.as_i64())
        .bind(decision)
        .fetch_optional(self.pool)
        .await?;

        if let Some(row) = updated {
            return Ok(row.into());
        }

        // Nothing updated: distinguish "missing" from "already settled".
        let existing = sqlx::query_as::<_, UnlockRow>(&format!(
            "SELECT {UNLOCK_COLUMNS} FROM contact_unlock WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        match existing {
            Some(row) => Err(RepositoryError::Conflict(format!(
                "unlock {id} is already {}",
                row.status
            ))),
            None => Err(RepositoryError::NotFound),
        }
    }
}

fn party(
    id: i64,
    name: String,
    email: &str,
    phone: &str,
) -> Result<PartySummary, RepositoryError> {
    let email = Email::parse(email)
        .map_err(|e| RepositoryError::corrupt("invalid email in database", e))?;
    let phone = Phone::parse(phone)
        .map_err(|e| RepositoryError::corrupt("invalid phone in database", e))?;
    Ok(PartySummary {
        id: UserId::new(id),
        name,
        email,
        phone,
    })
}
