//! Blog authoring route handlers.
//!
//! The panel works with raw markdown; rendering happens on the public
//! site's read path.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use tutorconnect_core::{BlogPost, BlogPostId};

use crate::db::blog::{BlogPostFields, BlogRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Payload for creating or updating a post.
#[derive(Debug, Deserialize)]
pub struct BlogPostPayload {
    pub title: String,
    pub body: String,
}

impl BlogPostPayload {
    fn into_fields(self) -> Result<BlogPostFields, AppError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(AppError::Validation("title is required".to_owned()));
        }
        if self.body.trim().is_empty() {
            return Err(AppError::Validation("body is required".to_owned()));
        }
        Ok(BlogPostFields {
            title,
            body: self.body,
        })
    }
}

/// List all posts, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<BlogPost>>, AppError> {
    let posts = BlogRepository::new(state.pool()).list().await?;
    Ok(Json(posts))
}

/// Create a post.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<BlogPostPayload>,
) -> Result<(StatusCode, Json<BlogPost>), AppError> {
    let fields = payload.into_fields()?;
    let post = BlogRepository::new(state.pool()).create(&fields).await?;

    tracing::info!(post_id = %post.id, admin = %admin.name, "blog post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// Update a post.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<BlogPostId>,
    Json(payload): Json<BlogPostPayload>,
) -> Result<Json<BlogPost>, AppError> {
    let fields = payload.into_fields()?;
    let post = BlogRepository::new(state.pool())
        .update(id, &fields)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("blog post {id}"))
            }
            other => other.into(),
        })?;

    Ok(Json(post))
}

/// Delete a post.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<BlogPostId>,
) -> Result<StatusCode, AppError> {
    let deleted = BlogRepository::new(state.pool()).delete(id).await?;

    if deleted {
        tracing::info!(post_id = %id, admin = %admin.name, "blog post deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("blog post {id}")))
    }
}
