//! Match listing for tutors.
//!
//! Pulls the candidate requests for the tutor's city, runs the core
//! matching predicate over them, and attaches the unlock state so the
//! handler can gate contact details. Fetch-then-filter, like the product
//! has always worked; at this marketplace's size the candidate set per
//! city is small.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;

use tutorconnect_core::{
    City, ContactUnlock, Email, ParentRequest, Phone, RequestId, UnlockStatus, UserId, matching,
};

use crate::db::RepositoryError;
use crate::db::requests::RequestRepository;
use crate::db::tutor_profiles::TutorProfileRepository;
use crate::db::unlocks::UnlockRepository;

/// Errors from the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The tutor has not created a profile yet.
    #[error("tutor profile not found")]
    NoTutorProfile,

    /// The request does not exist or does not match this tutor.
    #[error("request not found")]
    RequestNotFound,

    /// Underlying repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// A parent's contact details, revealed only for approved unlocks.
#[derive(Debug, Clone, Serialize)]
pub struct ParentContact {
    pub phone: Phone,
    pub email: Email,
}

/// One matched request as shown on the tutor dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct TutorMatch {
    /// The matched request.
    pub request: ParentRequest,
    /// Parent's display name - visible on every match.
    pub parent_name: String,
    /// Unlock state for this tutor and request; `None` before any ask.
    pub unlock_status: Option<UnlockStatus>,
    /// Contact details, present only when the unlock is approved.
    pub parent_contact: Option<ParentContact>,
}

/// Match service for the tutor dashboard.
pub struct MatchService<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchService<'a> {
    /// Create a new match service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the requests matching a tutor's profile, with contact gating.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::NoTutorProfile` if the tutor has no profile yet.
    pub async fn list_for_tutor(
        &self,
        tutor_id: UserId,
        tutor_city: City,
    ) -> Result<Vec<TutorMatch>, MatchError> {
        let profile = TutorProfileRepository::new(self.pool)
            .get_by_tutor(tutor_id)
            .await?
            .ok_or(MatchError::NoTutorProfile)?;

        let candidates = RequestRepository::new(self.pool)
            .list_by_owner_city(tutor_city)
            .await?;

        let unlocks = UnlockRepository::new(self.pool)
            .list_by_tutor(tutor_id)
            .await?;
        let unlock_by_request = index_by_request(&unlocks);

        let matches = candidates
            .into_iter()
            .filter(|candidate| {
                matching::request_matches(
                    &profile,
                    tutor_city,
                    &candidate.request,
                    candidate.parent_city,
                )
            })
            .map(|candidate| {
                let status = unlock_by_request.get(&candidate.request.id).copied();
                let parent_contact = (status == Some(UnlockStatus::Approved)).then(|| {
                    ParentContact {
                        phone: candidate.parent_phone,
                        email: candidate.parent_email,
                    }
                });

                TutorMatch {
                    request: candidate.request,
                    parent_name: candidate.parent_name,
                    unlock_status: status,
                    parent_contact,
                }
            })
            .collect();

        Ok(matches)
    }

    /// Record a callback request for a request that matches this tutor.
    ///
    /// Verifies the match before writing anything, so a tutor cannot
    /// unlock arbitrary request IDs.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::NoTutorProfile` if the tutor has no profile.
    /// Returns `MatchError::RequestNotFound` if the request is missing or
    /// does not match the tutor's profile.
    pub async fn request_callback(
        &self,
        tutor_id: UserId,
        tutor_city: City,
        request_id: RequestId,
    ) -> Result<(ContactUnlock, bool), MatchError> {
        let profile = TutorProfileRepository::new(self.pool)
            .get_by_tutor(tutor_id)
            .await?
            .ok_or(MatchError::NoTutorProfile)?;

        let candidates = RequestRepository::new(self.pool)
            .list_by_owner_city(tutor_city)
            .await?;

        let candidate = candidates
            .into_iter()
            .find(|c| c.request.id == request_id)
            .filter(|c| {
                matching::request_matches(&profile, tutor_city, &c.request, c.parent_city)
            })
            .ok_or(MatchError::RequestNotFound)?;

        let unlock = UnlockRepository::new(self.pool)
            .request_callback(tutor_id, candidate.request.parent_id, request_id)
            .await?;

        Ok(unlock)
    }
}

/// Index a tutor's unlocks by request, preferring settled rows.
///
/// A denied unlock can coexist with a newer pending one for the same
/// request; the newer row wins because the list is newest-first.
fn index_by_request(unlocks: &[ContactUnlock]) -> HashMap<RequestId, UnlockStatus> {
    let mut map = HashMap::with_capacity(unlocks.len());
    for unlock in unlocks {
        map.entry(unlock.request_id).or_insert(unlock.status);
    }
    map
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use tutorconnect_core::UnlockId;

    fn unlock(request: i64, status: UnlockStatus, age_secs: i64) -> ContactUnlock {
        ContactUnlock {
            id: UnlockId::new(request * 10),
            tutor_id: UserId::new(1),
            parent_id: UserId::new(2),
            request_id: RequestId::new(request),
            status,
            created_at: Utc::now() - chrono::Duration::seconds(age_secs),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_index_prefers_newest_row() {
        // newest-first ordering, as the repository returns them
        let unlocks = vec![
            unlock(5, UnlockStatus::Pending, 10),
            unlock(5, UnlockStatus::Denied, 100),
            unlock(7, UnlockStatus::Approved, 50),
        ];

        let map = index_by_request(&unlocks);
        assert_eq!(map.get(&RequestId::new(5)), Some(&UnlockStatus::Pending));
        assert_eq!(map.get(&RequestId::new(7)), Some(&UnlockStatus::Approved));
        assert_eq!(map.get(&RequestId::new(9)), None);
    }
}
