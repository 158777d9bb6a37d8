//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::matches::MatchError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Match listing or callback failed.
    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    /// Client sent a value that failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a `Validation` error from any displayable cause.
    pub fn validation(err: impl std::fmt::Display) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if is_server_fault(&self) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => auth_status(err),
            Self::Match(err) => match err {
                MatchError::NoTutorProfile | MatchError::RequestNotFound => StatusCode::NOT_FOUND,
                MatchError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Auth(err) => auth_message(err),
            Self::Match(err) => match err {
                MatchError::NoTutorProfile => {
                    "Create your tutor profile to see matched requests".to_string()
                }
                MatchError::RequestNotFound => "Request not found".to_string(),
                MatchError::Repository(_) => "Internal server error".to_string(),
            },
            Self::Validation(msg) => msg.clone(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::Unauthorized(_) => "Login required".to_string(),
            Self::Forbidden(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Whether this error is our fault rather than the client's.
fn is_server_fault(err: &AppError) -> bool {
    match err {
        AppError::Database(_) | AppError::Internal(_) => true,
        AppError::Auth(AuthError::Repository(_) | AuthError::PasswordHash)
        | AppError::Match(MatchError::Repository(_)) => true,
        _ => false,
    }
}

fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidCredentials | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
        AuthError::UserAlreadyExists => StatusCode::CONFLICT,
        AuthError::WeakPassword(_)
        | AuthError::InvalidName(_)
        | AuthError::InvalidEmail(_)
        | AuthError::InvalidPhone(_)
        | AuthError::RoleNotAllowed => StatusCode::UNPROCESSABLE_ENTITY,
        AuthError::PasswordHash | AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn auth_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials | AuthError::UserNotFound => "Invalid credentials".to_string(),
        AuthError::UserAlreadyExists => "An account with this email already exists".to_string(),
        AuthError::WeakPassword(msg) | AuthError::InvalidName(msg) => msg.clone(),
        AuthError::InvalidEmail(e) => e.to_string(),
        AuthError::InvalidPhone(e) => e.to_string(),
        AuthError::RoleNotAllowed => {
            "Choose parent or tutor; admin accounts cannot be registered".to_string()
        }
        AuthError::PasswordHash | AuthError::Repository(_) => "Internal server error".to_string(),
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("request 123".to_string());
        assert_eq!(err.to_string(), "Not found: request 123");

        let err = AppError::Validation("class must be between 1 and 12".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: class must be between 1 and 12"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("x".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::Validation("x".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::RoleNotAllowed)),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_match_error_status_codes() {
        assert_eq!(
            status_of(AppError::Match(MatchError::NoTutorProfile)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Match(MatchError::RequestNotFound)),
            StatusCode::NOT_FOUND
        );
    }
}
