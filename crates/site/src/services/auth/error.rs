//! Authentication error types.

use thiserror::Error;

use tutorconnect_core::{EmailError, PhoneError};

use crate::db::RepositoryError;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email or password. Deliberately indistinguishable from an
    /// unknown account to avoid leaking which emails are registered.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The account does not exist.
    #[error("user not found")]
    UserNotFound,

    /// The password fails the policy.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The display name is empty or unusable.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// The email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The phone number failed validation.
    #[error("invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// The requested role cannot be chosen at public registration.
    #[error("role cannot be self-registered")]
    RoleNotAllowed,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Underlying repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
