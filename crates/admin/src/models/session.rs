//! Session-related types for admin authentication.

use serde::{Deserialize, Serialize};

use tutorconnect_core::{Email, Profile, UserId};

/// Session-stored admin identity.
///
/// Only profiles with the admin role ever reach the session store here;
/// the login service checks the role before writing this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: UserId,
    /// Admin's email address.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
}

impl From<&Profile> for CurrentAdmin {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            name: profile.name.clone(),
        }
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
