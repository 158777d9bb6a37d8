//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::SiteConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; hands out references to the configuration
/// and the database pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: SiteConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }
}
