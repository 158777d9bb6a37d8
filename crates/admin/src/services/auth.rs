//! Admin authentication service.
//!
//! Logs in against the shared `profile` table but only accepts accounts
//! holding the admin role. A parent or tutor presenting valid credentials
//! gets the same "invalid credentials" answer as a wrong password, so the
//! login endpoint leaks nothing about which emails carry admin rights.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use sqlx::PgPool;
use thiserror::Error;

use tutorconnect_core::{Email, EmailError, Profile, Role};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;

/// Errors from the admin authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email, wrong password, or not an admin account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Underlying repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Admin authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Login with email and password; the account must hold the admin role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a wrong password, an
    /// unknown email, or a non-admin account.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, AuthError> {
        let email = Email::parse(email)?;

        let (profile, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if profile.role != Role::Admin {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(profile)
    }
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
