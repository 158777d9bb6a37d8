//! The matching predicate pairing parent requests with tutor profiles.
//!
//! Matching is a boolean filter, not a ranking: a request either fits a
//! tutor's profile or it does not, and the caller keeps whatever order the
//! rows arrived in. All four criteria must hold:
//!
//! 1. the request owner's city equals the tutor's city
//! 2. the request and the tutor share at least one subject
//! 3. the student's class falls inside the tutor's class range, inclusive
//! 4. some tutor locality preference overlaps the request locality
//!    (case-insensitive substring, in either direction)
//!
//! City lives on the [`Profile`](crate::domain::Profile), not on the
//! request or tutor profile, so callers pass both cities alongside the
//! entities themselves.

use crate::domain::{ParentRequest, TutorProfile};
use crate::types::City;

/// Whether two subject lists share at least one subject.
///
/// Subjects compare by exact string equality; the curated subject list
/// lives in the frontend, so by the time values reach the service both
/// sides use the same spelling.
#[must_use]
pub fn subjects_intersect(ours: &[String], theirs: &[String]) -> bool {
    ours.iter().any(|subject| theirs.contains(subject))
}

/// Whether any locality preference overlaps the request locality.
///
/// Localities are free text, so the check is deliberately loose: a
/// case-insensitive substring match in either direction. "Civil Lines"
/// matches "civil lines extension", and "Swaroop Nagar Block C" matches a
/// preference of "swaroop nagar".
#[must_use]
pub fn locality_overlaps(preferences: &[String], locality: &str) -> bool {
    let locality = locality.to_lowercase();
    preferences.iter().any(|preference| {
        let preference = preference.to_lowercase();
        preference.contains(&locality) || locality.contains(&preference)
    })
}

/// The full matching predicate.
///
/// Returns `true` when `request` (owned by a parent in `parent_city`)
/// fits `profile` (owned by a tutor in `tutor_city`).
#[must_use]
pub fn request_matches(
    profile: &TutorProfile,
    tutor_city: City,
    request: &ParentRequest,
    parent_city: City,
) -> bool {
    tutor_city == parent_city
        && subjects_intersect(&request.subjects, &profile.subjects)
        && profile.class_range.contains(request.class)
        && locality_overlaps(&profile.locality_preferences, &request.locality)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{
        Board, ClassLevel, ClassRange, Fee, RequestId, TutorProfileId, UserId,
    };

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn tutor_profile(subjects: &[&str], range: &str, localities: &[&str]) -> TutorProfile {
        TutorProfile {
            id: TutorProfileId::new(1),
            tutor_id: UserId::new(10),
            subjects: strings(subjects),
            class_range: ClassRange::parse(range).unwrap(),
            locality_preferences: strings(localities),
            fee_per_class: Fee::from_rupees(400).unwrap(),
            available_timings: "weekday evenings".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(subjects: &[&str], class: u8, locality: &str) -> ParentRequest {
        ParentRequest {
            id: RequestId::new(1),
            parent_id: UserId::new(20),
            student_name: Some("Aarav".to_owned()),
            board: Board::Cbse,
            class: ClassLevel::new(class).unwrap(),
            subjects: strings(subjects),
            locality: locality.to_owned(),
            preferred_timings: "after 5pm".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_match() {
        let profile = tutor_profile(&["Mathematics", "Physics"], "6-12", &["Civil Lines"]);
        let req = request(&["Mathematics"], 9, "Civil Lines");
        assert!(request_matches(&profile, City::Kanpur, &req, City::Kanpur));
    }

    #[test]
    fn test_city_mismatch_vetoes_everything() {
        let profile = tutor_profile(&["Mathematics"], "1-12", &["Civil Lines"]);
        let req = request(&["Mathematics"], 5, "Civil Lines");
        assert!(!request_matches(&profile, City::Kanpur, &req, City::Lucknow));
    }

    #[test]
    fn test_subject_intersection_is_symmetric() {
        let ours = strings(&["Mathematics", "Chemistry"]);
        let theirs = strings(&["Chemistry", "Biology"]);
        assert_eq!(
            subjects_intersect(&ours, &theirs),
            subjects_intersect(&theirs, &ours)
        );

        let disjoint = strings(&["English"]);
        assert_eq!(
            subjects_intersect(&ours, &disjoint),
            subjects_intersect(&disjoint, &ours)
        );
        assert!(!subjects_intersect(&ours, &disjoint));
    }

    #[test]
    fn test_no_common_subject() {
        let profile = tutor_profile(&["English", "Hindi"], "1-12", &["Aliganj"]);
        let req = request(&["Physics"], 8, "Aliganj");
        assert!(!request_matches(&profile, City::Lucknow, &req, City::Lucknow));
    }

    #[test]
    fn test_class_range_inclusive_at_both_ends() {
        let profile = tutor_profile(&["Mathematics"], "6-10", &["Sadar"]);
        for (class, expected) in [(5, false), (6, true), (10, true), (11, false)] {
            let req = request(&["Mathematics"], class, "Sadar");
            assert_eq!(
                request_matches(&profile, City::Unnao, &req, City::Unnao),
                expected,
                "class {class}"
            );
        }
    }

    #[test]
    fn test_locality_substring_either_direction() {
        let prefs = strings(&["Swaroop Nagar"]);
        // preference contained in request locality
        assert!(locality_overlaps(&prefs, "swaroop nagar block c"));
        // request locality contained in preference
        assert!(locality_overlaps(&strings(&["Greater Kalyanpur Area"]), "Kalyanpur"));
        // no overlap
        assert!(!locality_overlaps(&prefs, "Hazratganj"));
    }

    #[test]
    fn test_locality_is_case_insensitive() {
        let prefs = strings(&["CIVIL LINES"]);
        assert!(locality_overlaps(&prefs, "civil lines"));
    }

    #[test]
    fn test_empty_subject_list_never_matches() {
        let profile = tutor_profile(&["Mathematics"], "1-12", &["Sadar"]);
        let req = request(&[], 5, "Sadar");
        assert!(!request_matches(&profile, City::Kanpur, &req, City::Kanpur));
    }
}
