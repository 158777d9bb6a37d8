//! Tutor profile repository.
//!
//! A tutor has at most one profile; saving is an upsert keyed on the
//! unique `tutor_id` column.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use tutorconnect_core::{
    ClassRange, Fee, TutorProfile, TutorProfileId, UserId,
};

use super::RepositoryError;

/// Field values for creating or updating a tutor profile.
#[derive(Debug, Clone)]
pub struct TutorProfileFields {
    pub subjects: Vec<String>,
    pub class_range: ClassRange,
    pub locality_preferences: Vec<String>,
    pub fee_per_class: Fee,
    pub available_timings: String,
}

/// Database row for the `tutor_profile` table.
#[derive(Debug, sqlx::FromRow)]
struct TutorProfileRow {
    id: i64,
    tutor_id: i64,
    subjects: Vec<String>,
    class_min: i16,
    class_max: i16,
    locality_preferences: Vec<String>,
    fee_per_class: Decimal,
    available_timings: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TutorProfileRow> for TutorProfile {
    type Error = RepositoryError;

    fn try_from(row: TutorProfileRow) -> Result<Self, Self::Error> {
        let min = row
            .class_min
            .try_into()
            .map_err(|e| RepositoryError::corrupt("invalid class_min in database", e))?;
        let max = row
            .class_max
            .try_into()
            .map_err(|e| RepositoryError::corrupt("invalid class_max in database", e))?;
        let class_range = ClassRange::new(min, max)
            .map_err(|e| RepositoryError::corrupt("invalid class range in database", e))?;
        let fee_per_class = Fee::new(row.fee_per_class)
            .map_err(|e| RepositoryError::corrupt("invalid fee in database", e))?;

        Ok(Self {
            id: TutorProfileId::new(row.id),
            tutor_id: UserId::new(row.tutor_id),
            subjects: row.subjects,
            class_range,
            locality_preferences: row.locality_preferences,
            fee_per_class,
            available_timings: row.available_timings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const TUTOR_PROFILE_COLUMNS: &str = "id, tutor_id, subjects, class_min, class_max, \
                                     locality_preferences, fee_per_class, available_timings, \
                                     created_at, updated_at";

/// Repository for tutor profile database operations.
pub struct TutorProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TutorProfileRepository<'a> {
    /// Create a new tutor profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a tutor's profile, if they have created one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored values are invalid.
    pub async fn get_by_tutor(
        &self,
        tutor_id: UserId,
    ) -> Result<Option<TutorProfile>, RepositoryError> {
        let row = sqlx::query_as::<_, TutorProfileRow>(&format!(
            "SELECT {TUTOR_PROFILE_COLUMNS} FROM tutor_profile WHERE tutor_id = $1"
        ))
        .bind(tutor_id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create or update the tutor's profile in one statement.
    ///
    /// The unique `tutor_id` constraint turns a second save into an update,
    /// preserving the original `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(
        &self,
        tutor_id: UserId,
        fields: &TutorProfileFields,
    ) -> Result<TutorProfile, RepositoryError> {
        let row = sqlx::query_as::<_, TutorProfileRow>(&format!(
            "INSERT INTO tutor_profile
                 (tutor_id, subjects, class_min, class_max, locality_preferences,
                  fee_per_class, available_timings)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (tutor_id) DO UPDATE SET
                 subjects = EXCLUDED.subjects,
                 class_min = EXCLUDED.class_min,
                 class_max = EXCLUDED.class_max,
                 locality_preferences = EXCLUDED.locality_preferences,
                 fee_per_class = EXCLUDED.fee_per_class,
                 available_timings = EXCLUDED.available_timings,
                 updated_at = now()
             RETURNING {TUTOR_PROFILE_COLUMNS}"
        ))
        .bind(tutor_id.as_i64())
        .bind(&fields.subjects)
        .bind(fields.class_range.min().as_i16())
        .bind(fields.class_range.max().as_i16())
        .bind(&fields.locality_preferences)
        .bind(fields.fee_per_class)
        .bind(&fields.available_timings)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
