//! Authentication service.
//!
//! Email/password authentication with Argon2id hashes. Registration
//! creates the profile row with its role fixed forever; only parent and
//! tutor roles may be chosen here (admins are created via the CLI).

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use tutorconnect_core::{City, Email, Phone, Profile, Role};

use crate::db::RepositoryError;
use crate::db::users::{NewProfile, UserRepository};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Unvalidated registration input, as submitted by the client.
#[derive(Debug)]
pub struct Registration<'r> {
    pub name: &'r str,
    pub email: &'r str,
    pub phone: &'r str,
    pub city: City,
    pub role: Role,
    pub password: &'r str,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new parent or tutor.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RoleNotAllowed` for the admin role.
    /// Returns `AuthError::InvalidEmail`/`InvalidPhone` for bad contact data.
    /// Returns `AuthError::WeakPassword` if the password fails the policy.
    /// Returns `AuthError::UserAlreadyExists` if the email is registered.
    pub async fn register(&self, registration: Registration<'_>) -> Result<Profile, AuthError> {
        if !registration.role.is_self_registerable() {
            return Err(AuthError::RoleNotAllowed);
        }

        let name = registration.name.trim();
        if name.is_empty() {
            return Err(AuthError::InvalidName("name cannot be empty".to_owned()));
        }

        let email = Email::parse(registration.email)?;
        let phone = Phone::parse(registration.phone)?;
        validate_password(registration.password)?;
        let password_hash = hash_password(registration.password)?;

        let new = NewProfile {
            name: name.to_owned(),
            email,
            phone,
            city: registration.city,
            role: registration.role,
        };

        let profile = self
            .users
            .create(&new, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(profile)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, AuthError> {
        let email = Email::parse(email)?;

        let (profile, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(profile)
    }

    /// Get a profile by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the profile doesn't exist.
    pub async fn get_profile(
        &self,
        user_id: tutorconnect_core::UserId,
    ) -> Result<Profile, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
