//! Integration tests for site authentication and role gating.
//!
//! These tests require a running site server and a migrated database.
//! See the crate docs for setup; run with `-- --ignored`.

use reqwest::StatusCode;
use serde_json::json;

use tutorconnect_integration_tests::{client, register, site_base_url, unique_email};

#[tokio::test]
#[ignore = "Requires running site server"]
async fn test_register_login_me_logout() {
    let c = client();
    let email = unique_email("parent");

    let profile = register(&c, "parent", "Kanpur", &email).await;
    assert_eq!(profile["email"], email);
    assert_eq!(profile["role"], "parent");
    assert_eq!(profile["city"], "Kanpur");

    // Registration logs the user in
    let me = c
        .get(format!("{}/auth/me", site_base_url()))
        .send()
        .await
        .expect("Failed to get /auth/me");
    assert_eq!(me.status(), StatusCode::OK);

    // Logout drops the session
    let out = c
        .post(format!("{}/auth/logout", site_base_url()))
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(out.status(), StatusCode::NO_CONTENT);

    let me = c
        .get(format!("{}/auth/me", site_base_url()))
        .send()
        .await
        .expect("Failed to get /auth/me");
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);

    // Fresh login works
    let login = c
        .post(format!("{}/auth/login", site_base_url()))
        .json(&json!({ "email": email, "password": "test-password-1" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(login.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running site server"]
async fn test_register_rejects_admin_role() {
    let c = client();

    let resp = c
        .post(format!("{}/auth/register", site_base_url()))
        .json(&json!({
            "name": "Sneaky",
            "email": unique_email("sneaky"),
            "phone": "9876543210",
            "city": "Kanpur",
            "role": "admin",
            "password": "test-password-1",
        }))
        .send()
        .await
        .expect("Failed to send registration");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running site server"]
async fn test_duplicate_email_conflicts() {
    let c = client();
    let email = unique_email("dup");

    register(&c, "parent", "Kanpur", &email).await;

    let resp = c
        .post(format!("{}/auth/register", site_base_url()))
        .json(&json!({
            "name": "Duplicate",
            "email": email,
            "phone": "9876543210",
            "city": "Kanpur",
            "role": "tutor",
            "password": "test-password-1",
        }))
        .send()
        .await
        .expect("Failed to send registration");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running site server"]
async fn test_role_gating_on_request_endpoints() {
    let tutor = client();
    register(&tutor, "tutor", "Kanpur", &unique_email("tutor")).await;

    // A tutor cannot list or create parent requests
    let resp = tutor
        .get(format!("{}/requests", site_base_url()))
        .send()
        .await
        .expect("Failed to list requests");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // An anonymous client gets 401, not 403
    let anon = client();
    let resp = anon
        .get(format!("{}/requests", site_base_url()))
        .send()
        .await
        .expect("Failed to list requests");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running site server"]
async fn test_parent_cannot_touch_other_parents_request() {
    let owner = client();
    register(&owner, "parent", "Kanpur", &unique_email("owner")).await;

    let created: serde_json::Value = owner
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
    let id = created["id"].as_i64().expect("request id");

    let intruder = client();
    register(&intruder, "parent", "Kanpur", &unique_email("intruder")).await;

    // Editing someone else's request looks like a 404, not a 403
    let resp = intruder
        .put(format!("{}/requests/{id}", site_base_url()))
        .json(&json!({
            "student_name": "Hacked",
            "board": "CBSE",
            "class": 9,
            "subjects": ["Mathematics"],
            "locality": "Civil Lines",
            "preferred_timings": "",
        }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = intruder
        .delete(format!("{}/requests/{id}", site_base_url()))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The owner still can
    let resp = owner
        .delete(format!("{}/requests/{id}", site_base_url()))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
