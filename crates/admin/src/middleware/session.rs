//! Session middleware configuration for the admin panel.
//!
//! Separate cookie name and a shorter expiry than the public site:
//! reviewer sessions do not need to live a week.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tc_admin_session";

/// Session expiry time in seconds (12 hours).
const SESSION_EXPIRY_SECONDS: i64 = 12 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
