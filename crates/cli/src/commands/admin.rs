//! Admin account management commands.
//!
//! Public registration refuses the admin role, so this command is the
//! only way admin accounts come into existence.
//!
//! # Usage
//!
//! ```bash
//! tc-cli admin create -e ops@tutorconnect.in -n "Akash" -p <password> \
//!     --city Kanpur --phone 8181066459
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use tutorconnect_core::{City, Email, Phone, Role, UserId};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] tutorconnect_core::EmailError),

    /// Invalid phone.
    #[error("Invalid phone: {0}")]
    InvalidPhone(#[from] tutorconnect_core::PhoneError),

    /// Invalid city.
    #[error("Invalid city: {0}")]
    InvalidCity(#[from] tutorconnect_core::CityError),

    /// Password too short.
    #[error("Password must be at least 8 characters")]
    WeakPassword,

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,

    /// Account already exists.
    #[error("An account already exists with email: {0}")]
    UserExists(String),
}

/// Create a new admin account.
///
/// # Returns
///
/// The ID of the created profile.
///
/// # Errors
///
/// Returns `AdminError` for invalid inputs, a duplicate email, or
/// database failures.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
    phone: &str,
    city: &str,
) -> Result<UserId, AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;
    let phone = Phone::parse(phone)?;
    let city: City = city.parse()?;

    if password.len() < 8 {
        return Err(AdminError::WeakPassword);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AdminError::PasswordHash)?
        .to_string();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| AdminError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating admin account: {} ({})", name, email);

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO profile (name, email, phone, city, role, password_hash)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(name)
    .bind(email.as_str())
    .bind(phone.as_str())
    .bind(city)
    .bind(Role::Admin)
    .bind(&password_hash)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return AdminError::UserExists(email.to_string());
        }
        AdminError::Database(e)
    })?;

    Ok(UserId::new(id))
}
