//! Unlock review route handlers.
//!
//! Approving or denying a settled unlock returns 409; the SQL guard in the
//! repository is what actually prevents double decisions, these handlers
//! just translate the outcome.

use axum::{
    Json,
    extract::{Path, State},
};

use tutorconnect_core::{ContactUnlock, UnlockId, UnlockStatus};

use crate::db::unlocks::{UnlockQueueItem, UnlockRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List the pending review queue.
pub async fn pending(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<UnlockQueueItem>>, AppError> {
    let queue = UnlockRepository::new(state.pool()).list_pending().await?;
    Ok(Json(queue))
}

/// Approve a pending unlock.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UnlockId>,
) -> Result<Json<ContactUnlock>, AppError> {
    settle(&state, id, UnlockStatus::Approved, &admin.name).await
}

/// Deny a pending unlock.
pub async fn deny(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<UnlockId>,
) -> Result<Json<ContactUnlock>, AppError> {
    settle(&state, id, UnlockStatus::Denied, &admin.name).await
}

async fn settle(
    state: &AppState,
    id: UnlockId,
    decision: UnlockStatus,
    admin_name: &str,
) -> Result<Json<ContactUnlock>, AppError> {
    // Belt and suspenders with the SQL guard: the only legal source state
    // is pending.
    debug_assert!(UnlockStatus::Pending.can_transition_to(decision));

    let unlock = UnlockRepository::new(state.pool())
        .settle(id, decision)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("unlock {id}"))
            }
            other => other.into(),
        })?;

    tracing::info!(
        unlock_id = %id,
        decision = %decision,
        admin = admin_name,
        "unlock settled"
    );

    Ok(Json(unlock))
}
