//! Tower middleware and axum extractors.

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use auth::{RequireParent, RequireTutor, RequireUser};
pub use session::create_session_layer;
