//! Integration tests for the contact unlock workflow, end to end across
//! both binaries.
//!
//! Requires running site AND admin servers, plus the reviewer account
//! (see crate docs).

use reqwest::StatusCode;
use serde_json::{Value, json};

use tutorconnect_integration_tests::{
    admin_base_url, admin_login, client, register, site_base_url, unique_email,
};

/// Set up a matched parent/tutor pair and return (tutor client, request id).
async fn matched_pair() -> (reqwest::Client, i64) {
    let parent = client();
    register(&parent, "parent", "Kanpur", &unique_email("parent")).await;
    let created: Value = parent
        .post(format!("{}/requests", site_base_url()))
        .json(&json!({
            "student_name": "Aarav",
            "board": "CBSE",
            "class": 9,
            "subjects": ["Mathematics"],
            "locality": "Civil Lines",
            "preferred_timings": "Evenings",
        }))
        .send()
        .await
        .expect("Failed to create request")
        .json()
        .await
        .expect("Failed to parse request");
    let request_id = created["id"].as_i64().expect("request id");

    let tutor = client();
    register(&tutor, "tutor", "Kanpur", &unique_email("tutor")).await;
    let resp = tutor
        .put(format!("{}/tutor/profile", site_base_url()))
        .json(&json!({
            "subjects": ["Mathematics"],
            "class_min": 6,
            "class_max": 12,
            "locality_preferences": ["Civil Lines"],
            "fee_per_class": "450",
            "available_timings": "Evenings",
        }))
        .send()
        .await
        .expect("Failed to save tutor profile");
    assert_eq!(resp.status(), StatusCode::OK);

    (tutor, request_id)
}

/// Fetch the tutor's match entry for a request.
async fn find_match(tutor: &reqwest::Client, request_id: i64) -> Value {
    let matches: Vec<Value> = tutor
        .get(format!("{}/tutor/matches", site_base_url()))
        .send()
        .await
        .expect("Failed to list matches")
        .json()
        .await
        .expect("Failed to parse matches");
    matches
        .into_iter()
        .find(|m| m["request"]["id"].as_i64() == Some(request_id))
        .expect("request should match tutor")
}

#[tokio::test]
#[ignore = "Requires running site and admin servers"]
async fn test_unlock_approval_reveals_contact() {
    let (tutor, request_id) = matched_pair().await;

    // Ask for the callback
    let resp = tutor
        .post(format!("{}/tutor/matches/{request_id}/unlock", site_base_url()))
        .send()
        .await
        .expect("Failed to request unlock");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse unlock");
    let unlock_id = body["unlock"]["id"].as_i64().expect("unlock id");
    assert_eq!(body["unlock"]["status"], "pending");

    // Still pending: contact stays hidden
    let matched = find_match(&tutor, request_id).await;
    assert_eq!(matched["unlock_status"], "pending");
    assert!(matched["parent_contact"].is_null());

    // Reviewer approves it
    let admin = client();
    admin_login(&admin).await;
    let resp = admin
        .post(format!("{}/unlocks/{unlock_id}/approve", admin_base_url()))
        .send()
        .await
        .expect("Failed to approve");
    assert_eq!(resp.status(), StatusCode::OK);
    let settled: Value = resp.json().await.expect("Failed to parse unlock");
    assert_eq!(settled["status"], "approved");

    // Contact is now visible to the requesting tutor
    let matched = find_match(&tutor, request_id).await;
    assert_eq!(matched["unlock_status"], "approved");
    assert!(matched["parent_contact"]["phone"].is_string());
    assert!(matched["parent_contact"]["email"].is_string());
}

#[tokio::test]
#[ignore = "Requires running site and admin servers"]
async fn test_no_transition_skips_or_repeats() {
    let (tutor, request_id) = matched_pair().await;

    let body: Value = tutor
        .post(format!("{}/tutor/matches/{request_id}/unlock", site_base_url()))
        .send()
        .await
        .expect("Failed to request unlock")
        .json()
        .await
        .expect("Failed to parse unlock");
    let unlock_id = body["unlock"]["id"].as_i64().expect("unlock id");

    let admin = client();
    admin_login(&admin).await;

    // Deny it
    let resp = admin
        .post(format!("{}/unlocks/{unlock_id}/deny", admin_base_url()))
        .send()
        .await
        .expect("Failed to deny");
    assert_eq!(resp.status(), StatusCode::OK);

    // A second decision on the same row conflicts, in either direction
    for action in ["approve", "deny"] {
        let resp = admin
            .post(format!("{}/unlocks/{unlock_id}/{action}", admin_base_url()))
            .send()
            .await
            .expect("Failed to send decision");
        assert_eq!(resp.status(), StatusCode::CONFLICT, "{action} after deny");
    }

    // Denied: tutor still sees no contact
    let matched = find_match(&tutor, request_id).await;
    assert_eq!(matched["unlock_status"], "denied");
    assert!(matched["parent_contact"].is_null());
}

#[tokio::test]
#[ignore = "Requires running site and admin servers"]
async fn test_duplicate_callback_requests_are_idempotent() {
    let (tutor, request_id) = matched_pair().await;

    let first = tutor
        .post(format!("{}/tutor/matches/{request_id}/unlock", site_base_url()))
        .send()
        .await
        .expect("Failed to request unlock");
    assert_eq!(first.status(), StatusCode::CREATED);
    let first: Value = first.json().await.expect("Failed to parse unlock");

    // Asking again returns the same row with 200, not a new one
    let second = tutor
        .post(format!("{}/tutor/matches/{request_id}/unlock", site_base_url()))
        .send()
        .await
        .expect("Failed to request unlock");
    assert_eq!(second.status(), StatusCode::OK);
    let second: Value = second.json().await.expect("Failed to parse unlock");

    assert_eq!(first["unlock"]["id"], second["unlock"]["id"]);
}

#[tokio::test]
#[ignore = "Requires running site and admin servers"]
async fn test_pending_queue_shows_joined_detail() {
    let (tutor, request_id) = matched_pair().await;
    tutor
        .post(format!("{}/tutor/matches/{request_id}/unlock", site_base_url()))
        .send()
        .await
        .expect("Failed to request unlock");

    let admin = client();
    admin_login(&admin).await;

    let queue: Vec<Value> = admin
        .get(format!("{}/unlocks", admin_base_url()))
        .send()
        .await
        .expect("Failed to list queue")
        .json()
        .await
        .expect("Failed to parse queue");

    let entry = queue
        .iter()
        .find(|e| e["request"]["id"].as_i64() == Some(request_id))
        .expect("queue should contain the new unlock");

    // Reviewers see both parties in full, plus the request
    assert!(entry["tutor"]["phone"].is_string());
    assert!(entry["parent"]["phone"].is_string());
    assert_eq!(entry["unlock"]["status"], "pending");
    assert_eq!(entry["request"]["subjects"][0], "Mathematics");
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_admin_login_rejects_non_admins() {
    // A site account with valid credentials is not an admin account
    let site_client = client();
    let email = unique_email("parent");
    register(&site_client, "parent", "Kanpur", &email).await;

    let admin = client();
    let resp = admin
        .post(format!("{}/auth/login", admin_base_url()))
        .json(&json!({ "email": email, "password": "test-password-1" }))
        .send()
        .await
        .expect("Failed to send admin login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // And without a session the queue is closed
    let resp = admin
        .get(format!("{}/unlocks", admin_base_url()))
        .send()
        .await
        .expect("Failed to request queue");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
