//! HTTP route handlers for the public site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Auth
//! POST /auth/register          - Register as parent or tutor
//! POST /auth/login             - Login
//! POST /auth/logout            - Logout
//! GET  /auth/me                - Current profile
//!
//! # Parent requests (parent role)
//! GET    /requests             - Own requests, newest first
//! POST   /requests             - Post a requirement
//! PUT    /requests/{id}        - Edit own request
//! DELETE /requests/{id}        - Delete own request
//!
//! # Tutor (tutor role)
//! GET  /tutor/profile          - Own teaching profile
//! PUT  /tutor/profile          - Create or update profile (upsert)
//! GET  /tutor/matches          - Matching requests with contact gating
//! POST /tutor/matches/{request_id}/unlock - Request a callback
//!
//! # Blog (public)
//! GET  /blog                   - All posts, newest first
//! GET  /blog/{id}              - Single post
//! ```

pub mod auth;
pub mod blog;
pub mod requests;
pub mod tutor;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::middleware::rate_limit;
use crate::state::AppState;

/// Create the auth routes router.
///
/// Only login carries the strict limiter; it is the brute-force target.
/// Registration is already throttled by email uniqueness and sits under
/// the general API limiter with everything else.
pub fn auth_routes() -> Router<AppState> {
    let login = Router::new()
        .route("/login", post(auth::login))
        .layer(rate_limit::auth_rate_limiter());

    Router::new()
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .merge(login)
}

/// Create the parent request routes router.
pub fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(requests::list).post(requests::create))
        .route(
            "/{id}",
            put(requests::update).delete(requests::delete),
        )
}

/// Create the tutor routes router.
pub fn tutor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(tutor::get_profile).put(tutor::upsert_profile),
        )
        .route("/matches", get(tutor::matches))
        .route("/matches/{request_id}/unlock", post(tutor::request_unlock))
}

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list))
        .route("/{id}", get(blog::show))
}

/// Create all routes for the site.
///
/// Everything shares the relaxed API limiter; login additionally carries
/// the strict one from `auth_routes`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/requests", request_routes())
        .nest("/tutor", tutor_routes())
        .nest("/blog", blog_routes())
        .layer(rate_limit::api_rate_limiter())
}
