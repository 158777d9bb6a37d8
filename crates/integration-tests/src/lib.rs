//! Integration tests for TutorConnect.
//!
//! # Running Tests
//!
//! The tests drive real servers over HTTP, so they are `#[ignore]`d by
//! default. To run them:
//!
//! ```bash
//! # Apply migrations and start both binaries
//! cargo run -p tutorconnect-cli -- migrate
//! cargo run -p tutorconnect-site &
//! cargo run -p tutorconnect-admin &
//!
//! # Create the reviewer account the admin tests log in with
//! cargo run -p tutorconnect-cli -- admin create \
//!     -e reviewer@tutorconnect.test -n "Reviewer" -p reviewer-password
//!
//! # Run everything, ignored tests included
//! cargo test -p tutorconnect-integration-tests -- --ignored
//! ```
//!
//! Each test registers its own throwaway accounts (unique emails via
//! UUID), so tests are independent and rerunnable against the same
//! database.

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the site API (configurable via environment).
#[must_use]
pub fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Email the admin tests log in with; create it via `tc-cli admin create`.
#[must_use]
pub fn reviewer_email() -> String {
    std::env::var("REVIEWER_EMAIL").unwrap_or_else(|_| "reviewer@tutorconnect.test".to_string())
}

/// Password for the reviewer account.
#[must_use]
pub fn reviewer_password() -> String {
    std::env::var("REVIEWER_PASSWORD").unwrap_or_else(|_| "reviewer-password".to_string())
}

/// A cookie-holding HTTP client; one per simulated user.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for a throwaway test account.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@tutorconnect.test", uuid::Uuid::new_v4())
}

/// Register a parent or tutor on the site and leave the client logged in.
///
/// Returns the created profile as JSON.
///
/// # Panics
///
/// Panics if registration does not return 201.
pub async fn register(client: &Client, role: &str, city: &str, email: &str) -> Value {
    let resp = client
        .post(format!("{}/auth/register", site_base_url()))
        .json(&json!({
            "name": format!("Test {role}"),
            "email": email,
            "phone": "9876543210",
            "city": city,
            "role": role,
            "password": "test-password-1",
        }))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), 201, "registration should return 201");
    resp.json().await.expect("Failed to parse profile")
}

/// Log a reviewer into the admin panel and leave the client logged in.
///
/// # Panics
///
/// Panics if the login fails.
pub async fn admin_login(client: &Client) {
    let resp = client
        .post(format!("{}/auth/login", admin_base_url()))
        .json(&json!({
            "email": reviewer_email(),
            "password": reviewer_password(),
        }))
        .send()
        .await
        .expect("Failed to log into admin panel");

    assert_eq!(
        resp.status(),
        200,
        "admin login failed; create the reviewer account with tc-cli first"
    );
}
