//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use tutorconnect_core::{City, Email, Profile, Role, UserId};

/// Session-stored user identity.
///
/// Role and city ride along with the ID: both are immutable after
/// registration, and the auth extractors and match listing need them on
/// every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Role fixed at registration.
    pub role: Role,
    /// City the user registered in.
    pub city: City,
}

impl From<&Profile> for CurrentUser {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            role: profile.role,
            city: profile.city,
        }
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
