//! Entity structs shared between the binaries.
//!
//! These are validated domain objects, separate from the database row
//! types that the repositories in `site` and `admin` map into them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    BlogPostId, Board, City, ClassLevel, ClassRange, Email, Fee, Phone, RequestId, Role,
    TutorProfileId, UnlockId, UnlockStatus, UserId,
};

/// A registered user: parent, tutor, or admin.
///
/// The password hash never leaves the repository layer; this struct is
/// safe to serialize in "own profile" responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique profile ID.
    pub id: UserId,
    /// Full display name.
    pub name: String,
    /// Login email, normalized to lowercase.
    pub email: Email,
    /// Contact phone number.
    pub phone: Phone,
    /// City the user lives in; matching never crosses cities.
    pub city: City,
    /// Role assigned at registration, immutable thereafter.
    pub role: Role,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A parent's posted tuition requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentRequest {
    /// Unique request ID.
    pub id: RequestId,
    /// Owning parent; only the owner may edit or delete the request.
    pub parent_id: UserId,
    /// Student's name, optional - some parents prefer not to share it.
    pub student_name: Option<String>,
    /// School board the student studies under.
    pub board: Board,
    /// Class (standard) the student is in.
    pub class: ClassLevel,
    /// Subjects tuition is needed for; never empty.
    pub subjects: Vec<String>,
    /// Free-text locality within the parent's city.
    pub locality: String,
    /// Free-text preferred timings (e.g. "weekday evenings").
    pub preferred_timings: String,
    /// When the request was posted.
    pub created_at: DateTime<Utc>,
    /// When the request was last edited.
    pub updated_at: DateTime<Utc>,
}

/// A tutor's teaching profile. At most one exists per tutor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorProfile {
    /// Unique profile ID.
    pub id: TutorProfileId,
    /// Owning tutor.
    pub tutor_id: UserId,
    /// Subjects the tutor teaches; never empty.
    pub subjects: Vec<String>,
    /// Inclusive range of classes taught.
    pub class_range: ClassRange,
    /// Localities the tutor will travel to; never empty.
    pub locality_preferences: Vec<String>,
    /// Fee charged per class.
    pub fee_per_class: Fee,
    /// Free-text availability.
    pub available_timings: String,
    /// When the profile was first created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A tutor's request to see a parent's contact details.
///
/// Created in [`UnlockStatus::Pending`] by the tutor; settled exactly once
/// by an admin; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactUnlock {
    /// Unique unlock ID.
    pub id: UnlockId,
    /// Tutor who asked for the callback.
    pub tutor_id: UserId,
    /// Parent whose contact details are at stake.
    pub parent_id: UserId,
    /// The matched request that prompted the ask.
    pub request_id: RequestId,
    /// Workflow status.
    pub status: UnlockStatus,
    /// When the tutor asked.
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

/// A blog post written by the admin team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Unique post ID.
    pub id: BlogPostId,
    /// Post title.
    pub title: String,
    /// Post body as markdown; the public site renders it to HTML.
    pub body: String,
    /// When the post was published.
    pub created_at: DateTime<Utc>,
    /// When the post was last edited.
    pub updated_at: DateTime<Utc>,
}
