//! User roles.

use serde::{Deserialize, Serialize};

/// The role a profile was registered with.
///
/// Assigned at registration and immutable thereafter; no endpoint may
/// change it. Admin accounts are created out-of-band via the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A parent posting tuition requirements for their child.
    Parent,
    /// A tutor looking for students.
    Tutor,
    /// An operator who reviews contact unlock requests.
    Admin,
}

impl Role {
    /// Whether this role may be chosen at public registration.
    #[must_use]
    pub const fn is_self_registerable(&self) -> bool {
        matches!(self, Self::Parent | Self::Tutor)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parent => write!(f, "parent"),
            Self::Tutor => write!(f, "tutor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent" => Ok(Self::Parent),
            "tutor" => Ok(Self::Tutor),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_str_roundtrip() {
        for role in [Role::Parent, Role::Tutor, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_self_registerable() {
        assert!(Role::Parent.is_self_registerable());
        assert!(Role::Tutor.is_self_registerable());
        assert!(!Role::Admin.is_self_registerable());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Parent).unwrap(), "\"parent\"");
        let back: Role = serde_json::from_str("\"tutor\"").unwrap();
        assert_eq!(back, Role::Tutor);
    }
}
