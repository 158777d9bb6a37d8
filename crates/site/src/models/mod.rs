//! Request-scoped models for the site.

pub mod session;

pub use session::{CurrentUser, session_keys};
