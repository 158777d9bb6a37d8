//! Parent request repository.
//!
//! Ownership is enforced in the SQL predicates: every mutating statement
//! includes the owner's ID, so a parent editing someone else's request
//! simply affects zero rows.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tutorconnect_core::{
    Board, City, ClassLevel, Email, ParentRequest, Phone, RequestId, UserId,
};

use super::RepositoryError;

/// Field values for creating or replacing a parent request.
#[derive(Debug, Clone)]
pub struct RequestFields {
    pub student_name: Option<String>,
    pub board: Board,
    pub class: ClassLevel,
    pub subjects: Vec<String>,
    pub locality: String,
    pub preferred_timings: String,
}

/// A request joined with the facts about its owner that matching and
/// contact gating need.
#[derive(Debug, Clone)]
pub struct RequestWithParent {
    pub request: ParentRequest,
    pub parent_name: String,
    pub parent_email: Email,
    pub parent_phone: Phone,
    pub parent_city: City,
}

/// Database row for the `parent_request` table.
#[derive(Debug, sqlx::FromRow)]
struct RequestRow {
    id: i64,
    parent_id: i64,
    student_name: Option<String>,
    board: Board,
    class: i16,
    subjects: Vec<String>,
    locality: String,
    preferred_timings: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for ParentRequest {
    type Error = RepositoryError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        let class = ClassLevel::try_from(row.class)
            .map_err(|e| RepositoryError::corrupt("invalid class in database", e))?;

        Ok(Self {
            id: RequestId::new(row.id),
            parent_id: UserId::new(row.parent_id),
            student_name: row.student_name,
            board: row.board,
            class,
            subjects: row.subjects,
            locality: row.locality,
            preferred_timings: row.preferred_timings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const REQUEST_COLUMNS: &str = "id, parent_id, student_name, board, class, subjects, locality, \
                               preferred_timings, created_at, updated_at";

/// Repository for parent request database operations.
pub struct RequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RequestRepository<'a> {
    /// Create a new request repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a parent's own requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_parent(
        &self,
        parent_id: UserId,
    ) -> Result<Vec<ParentRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, RequestRow>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM parent_request
             WHERE parent_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(parent_id.as_i64())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a request by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: RequestId) -> Result<Option<ParentRequest>, RepositoryError> {
        let row = sqlx::query_as::<_, RequestRow>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM parent_request WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new request owned by `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        parent_id: UserId,
        fields: &RequestFields,
    ) -> Result<ParentRequest, RepositoryError> {
        let row = sqlx::query_as::<_, RequestRow>(&format!(
            "INSERT INTO parent_request
                 (parent_id, student_name, board, class, subjects, locality, preferred_timings)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(parent_id.as_i64())
        .bind(&fields.student_name)
        .bind(fields.board)
        .bind(fields.class.as_i16())
        .bind(&fields.subjects)
        .bind(&fields.locality)
        .bind(&fields.preferred_timings)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Replace a request's fields, but only if `parent_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request does not exist or
    /// belongs to another parent.
    pub async fn update(
        &self,
        id: RequestId,
        parent_id: UserId,
        fields: &RequestFields,
    ) -> Result<ParentRequest, RepositoryError> {
        let row = sqlx::query_as::<_, RequestRow>(&format!(
            "UPDATE parent_request
             SET student_name = $3, board = $4, class = $5, subjects = $6,
                 locality = $7, preferred_timings = $8, updated_at = now()
             WHERE id = $1 AND parent_id = $2
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(id.as_i64())
        .bind(parent_id.as_i64())
        .bind(&fields.student_name)
        .bind(fields.board)
        .bind(fields.class.as_i16())
        .bind(&fields.subjects)
        .bind(&fields.locality)
        .bind(&fields.preferred_timings)
        .fetch_optional(self.pool)
        .await?;

        row.map_or(Err(RepositoryError::NotFound), TryInto::try_into)
    }

    /// Delete a request, but only if `parent_id` owns it.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted, `false` if the request did not
    /// exist or belongs to another parent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: RequestId, parent_id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM parent_request WHERE id = $1 AND parent_id = $2",
        )
        .bind(id.as_i64())
        .bind(parent_id.as_i64())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List requests whose owner lives in `city`, joined with the owner
    /// facts needed for matching, newest first.
    ///
    /// The city filter is a prefilter; the full matching predicate still
    /// runs in the service layer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if joined contact data is invalid.
    pub async fn list_by_owner_city(
        &self,
        city: City,
    ) -> Result<Vec<RequestWithParent>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct JoinedRow {
            #[sqlx(flatten)]
            request: RequestRow,
            parent_name: String,
            parent_email: String,
            parent_phone: String,
            parent_city: City,
        }

        let rows = sqlx::query_as::<_, JoinedRow>(
            "SELECT r.id, r.parent_id, r.student_name, r.board, r.class, r.subjects,
                    r.locality, r.preferred_timings, r.created_at, r.updated_at,
                    p.name AS parent_name, p.email AS parent_email,
                    p.phone AS parent_phone, p.city AS parent_city
             FROM parent_request r
             JOIN profile p ON p.id = r.parent_id
             WHERE p.city = $1
             ORDER BY r.created_at DESC",
        )
        .bind(city)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let parent_email = Email::parse(&row.parent_email)
                    .map_err(|e| RepositoryError::corrupt("invalid email in database", e))?;
                let parent_phone = Phone::parse(&row.parent_phone)
                    .map_err(|e| RepositoryError::corrupt("invalid phone in database", e))?;
                Ok(RequestWithParent {
                    request: row.request.try_into()?,
                    parent_name: row.parent_name,
                    parent_email,
                    parent_phone,
                    parent_city: row.parent_city,
                })
            })
            .collect()
    }
}
