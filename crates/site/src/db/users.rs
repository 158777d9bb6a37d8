//! Profile repository for database operations.
//!
//! Queries use the runtime `query_as` API with explicit row structs that
//! convert into the core domain types.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tutorconnect_core::{City, Email, Phone, Profile, Role, UserId};

use super::{RepositoryError, conflict_on_unique};

/// A new profile to insert at registration.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub email: Email,
    pub phone: Phone,
    pub city: City,
    pub role: Role,
}

/// Database row for the `profile` table.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    city: City,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
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

/// Repository for profile database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored contact data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profile WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a profile by its email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored contact data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profile WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new profile with its password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        new: &NewProfile,
        password_hash: &str,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO profile (name, email, phone, city, role, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.email.as_str())
        .bind(new.phone.as_str())
        .bind(new.city)
        .bind(new.role)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "email already exists"))?;

        row.try_into()
    }

    /// Get a profile together with its password hash, by email.
    ///
    /// Returns `None` if no such profile exists.
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
