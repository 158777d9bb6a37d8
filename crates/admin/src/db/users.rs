//! Profile reads for the admin panel.
//!
//! The panel never creates or mutates profiles; registration happens on
//! the site and admin accounts come from the CLI.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tutorconnect_core::{City, Email, Phone, Profile, Role, UserId};

use super::RepositoryError;

/// Database row for the `profile` table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProfileRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: City,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email)
            .map_err(|e| RepositoryError::corrupt("invalid email in database", e))?;
        let phone = Phone::parse(&row.phone)
            .map_err(|e| RepositoryError::corrupt("invalid phone in database", e))?;

        Ok(Self {
            id: UserId::new(row.id),
            name: row.name,
            email,
            phone,
            city: row.city,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PROFILE_COLUMNS: &str = "id, name, email, phone, city, role, created_at, updated_at";

/// Repository for profile reads.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every profile, optionally narrowed to one role, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored contact data is invalid.
    pub async fn list(&self, role: Option<Role>) -> Result<Vec<Profile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profile
             WHERE $1::user_role IS NULL OR role = $1
             ORDER BY created_at DESC"
        ))
        .bind(role)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a profile together with its password hash, by email.
    ///
    /// Used by the admin login flow.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored contact data is invalid.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Profile, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct WithHash {
            #[sqlx(flatten)]
            profile: ProfileRow,
            password_hash: String,
        }

        let row = sqlx::query_as::<_, WithHash>(&format!(
            "SELECT {PROFILE_COLUMNS}, password_hash FROM profile WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some((row.profile.try_into()?, row.password_hash)))
    }
}
