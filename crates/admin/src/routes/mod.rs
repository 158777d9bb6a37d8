//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Auth
//! POST /auth/login             - Admin login (admin role required)
//! POST /auth/logout            - Logout
//! GET  /auth/me                - Current admin identity
//!
//! # Unlock review queue
//! GET  /unlocks                - Pending queue with joined detail
//! POST /unlocks/{id}/approve   - Approve a pending unlock
//! POST /unlocks/{id}/deny      - Deny a pending unlock
//!
//! # Blog
//! GET    /blog                 - All posts (raw markdown, for editing)
//! POST   /blog                 - Create a post
//! PUT    /blog/{id}            - Update a post
//! DELETE /blog/{id}            - Delete a post
//!
//! # Users
//! GET  /users                  - Profile listing (optional ?role= filter)
//! ```

pub mod auth;
pub mod blog;
pub mod unlocks;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the unlock review routes router.
pub fn unlock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(unlocks::pending))
        .route("/{id}/approve", post(unlocks::approve))
        .route("/{id}/deny", post(unlocks::deny))
}

/// Create the blog authoring routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list).post(blog::create))
        .route("/{id}", put(blog::update).delete(blog::delete))
}

/// Create the user listing routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(users::list))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/unlocks", unlock_routes())
        .nest("/blog", blog_routes())
        .nest("/users", user_routes())
}
