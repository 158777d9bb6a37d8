//! Admin authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::middleware::auth::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Handle admin login.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<CurrentAdmin>, AppError> {
    let profile = AuthService::new(state.pool())
        .login(&payload.email, &payload.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "admin login failed"))?;

    let admin = CurrentAdmin::from(&profile);

    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session rotation failed: {e}")))?;
    set_current_admin(&session, &admin)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(admin_id = %admin.id, "admin logged in");
    Ok(Json(admin))
}

/// Handle logout.
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::error!(error = %e, "failed to clear session admin");
    }
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "failed to flush session");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Return the logged-in admin's identity.
pub async fn me(RequireAdmin(admin): RequireAdmin) -> Json<CurrentAdmin> {
    Json(admin)
}
