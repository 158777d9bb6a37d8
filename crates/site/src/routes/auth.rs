//! Authentication route handlers.
//!
//! Registration and login both establish a session on success, mirroring
//! the product's "register and you're in" flow.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use tutorconnect_core::{City, Profile, Role};

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::middleware::RequireUser;
use crate::models::CurrentUser;
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

// =============================================================================
// Payload Types
// =============================================================================

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: City,
    pub role: Role,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle registration.
///
/// Creates the profile, logs the new user in, and returns the profile.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterPayload>,
) -> Result<Response, AppError> {
    let profile = AuthService::new(state.pool())
        .register(Registration {
            name: &payload.name,
            email: &payload.email,
            phone: &payload.phone,
            city: payload.city,
            role: payload.role,
            password: &payload.password,
        })
        .await?;

    establish_session(&session, &profile).await?;
    tracing::info!(user_id = %profile.id, role = %profile.role, "new registration");

    Ok((StatusCode::CREATED, Json(profile)).into_response())
}

/// Handle login.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Profile>, AppError> {
    let profile = AuthService::new(state.pool())
        .login(&payload.email, &payload.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "login failed"))?;

    establish_session(&session, &profile).await?;

    Ok(Json(profile))
}

/// Handle logout.
///
/// Clears the current user and destroys the whole session.
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "failed to clear session user");
    }
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "failed to flush session");
    }
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// Return the logged-in user's own profile.
pub async fn me(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Profile>, AppError> {
    let profile = AuthService::new(state.pool()).get_profile(user.id).await?;
    Ok(Json(profile))
}

/// Rotate the session and attach the freshly authenticated user to it.
async fn establish_session(session: &Session, profile: &Profile) -> Result<(), AppError> {
    // New session ID on every privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session rotation failed: {e}")))?;

    set_current_user(session, &CurrentUser::from(profile))
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    set_sentry_user(&profile.id, Some(profile.email.as_str()));
    Ok(())
}
