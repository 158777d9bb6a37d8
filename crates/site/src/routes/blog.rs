//! Public blog route handlers.
//!
//! Post bodies are authored as markdown in the admin panel and rendered
//! to HTML here, so the frontend never has to ship a markdown parser.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use comrak::{Options, markdown_to_html};
use serde::Serialize;

use tutorconnect_core::{BlogPost, BlogPostId};

use crate::db::blog::BlogRepository;
use crate::error::AppError;
use crate::state::AppState;

/// A blog post as served to readers.
#[derive(Debug, Serialize)]
pub struct BlogPostView {
    pub id: BlogPostId,
    pub title: String,
    /// Rendered HTML body.
    pub html: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPost> for BlogPostView {
    fn from(post: BlogPost) -> Self {
        let html = markdown_to_html(&post.body, &Options::default());
        Self {
            id: post.id,
            title: post.title,
            html,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// List all posts, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BlogPostView>>, AppError> {
    let posts = BlogRepository::new(state.pool()).list().await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

/// Show a single post.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<BlogPostId>,
) -> Result<Json<BlogPostView>, AppError> {
    let post = BlogRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blog post {id}")))?;

    Ok(Json(post.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_renders_to_html() {
        let post = BlogPost {
            id: BlogPostId::new(1),
            title: "Finding a tutor".to_owned(),
            body: "# Heading\n\nSome **bold** advice.".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let view = BlogPostView::from(post);
        assert!(view.html.contains("<h1>"));
        assert!(view.html.contains("<strong>bold</strong>"));
    }
}
