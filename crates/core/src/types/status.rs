//! Contact unlock status and its transition rules.

use serde::{Deserialize, Serialize};

/// Status of a contact unlock request.
///
/// The lifecycle is `Pending -> {Approved, Denied}`. A row is created in
/// `Pending` by a tutor's callback request; only an admin moves it onward,
/// and a settled row never changes again. The repositories enforce the same
/// rule in SQL, so the type-level check and the storage-level guard agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "unlock_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum UnlockStatus {
    Pending,
    Approved,
    Denied,
}

impl UnlockStatus {
    /// Whether an admin has already decided this unlock.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }

    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// Only `Pending -> Approved` and `Pending -> Denied` are legal; there
    /// is no un-approve, no re-open, and no self-transition.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Denied)
        )
    }
}

impl std::fmt::Display for UnlockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Denied => write!(f, "denied"),
        }
    }
}

impl std::str::FromStr for UnlockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "denied" => Ok(Self::Denied),
            _ => Err(format!("invalid unlock status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ALL: [UnlockStatus; 3] = [
        UnlockStatus::Pending,
        UnlockStatus::Approved,
        UnlockStatus::Denied,
    ];

    #[test]
    fn test_pending_can_settle_either_way() {
        assert!(UnlockStatus::Pending.can_transition_to(UnlockStatus::Approved));
        assert!(UnlockStatus::Pending.can_transition_to(UnlockStatus::Denied));
    }

    #[test]
    fn test_no_transition_skips_or_reverses() {
        for from in [UnlockStatus::Approved, UnlockStatus::Denied] {
            for to in ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to} must be illegal");
            }
        }
        assert!(!UnlockStatus::Pending.can_transition_to(UnlockStatus::Pending));
    }

    #[test]
    fn test_settled() {
        assert!(!UnlockStatus::Pending.is_settled());
        assert!(UnlockStatus::Approved.is_settled());
        assert!(UnlockStatus::Denied.is_settled());
    }

    #[test]
    fn test_display_from_str_roundtrip() {
        for status in ALL {
            assert_eq!(
                status.to_string().parse::<UnlockStatus>().unwrap(),
                status
            );
        }
    }
}
