//! End-to-end authentication flow tests
//!
//! These exercise the full register → login → list → logout scenario
//! against a real database. Run with:
//! `TEST_DATABASE_URL=... cargo test -- --ignored`

mod common;

use axum::http::StatusCode;
use common::{cookie_pair, TestApp};

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_stores_hash_not_plaintext() {
    let app = TestApp::new().await;
    app.cleanup().await;

    let (status, body, _) = app
        .post(
            "/api/register",
            r#"{"username":"alice","email":"a@x.com","password":"secret1"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("alice"));
    assert!(!body.contains(r#""secret1""#));

    let stored: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'alice'")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_ne!(stored, "secret1");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_unknown_user_message() {
    let app = TestApp::new().await;
    app.cleanup().await;

    let (status, body, set_cookie) = app
        .post("/api/login", r#"{"username":"ghost","password":"whatever"}"#)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("User ghost does not exist."));
    assert!(set_cookie.is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password_message_and_no_session() {
    let app = TestApp::new().await;
    app.cleanup().await;

    app.post(
        "/api/register",
        r#"{"username":"bob","email":"b@x.com","password":"right-one"}"#,
    )
    .await;

    let (status, body, set_cookie) = app
        .post("/api/login", r#"{"username":"bob","password":"wrong-one"}"#)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Incorrect password"));
    assert!(!body.contains("does not exist"));
    assert!(set_cookie.is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_full_session_lifecycle() {
    let app = TestApp::new().await;
    app.cleanup().await;

    // Register
    let (status, _, _) = app
        .post(
            "/api/register",
            r#"{"username":"alice","email":"a@x.com","password":"secret1"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Login
    let (status, body, set_cookie) = app
        .post("/api/login", r#"{"username":"alice","password":"secret1"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome back alice :)"));
    let cookie = cookie_pair(&set_cookie.expect("login sets the session cookie"));

    // List users with the session
    let (status, body) = app.get("/api/users", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("alice"));

    // Same request without the cookie is rejected
    let (status, _) = app.get("/api/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The globally-guarded restricted route behaves the same
    let (status, _) = app.get("/api/restricted/users", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get("/api/restricted/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Logout
    let (status, body) = app.get("/api/logout", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("User was logged out"));

    // The stale cookie no longer grants access
    let (status, _) = app.get("/api/users", Some(&cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_users_listing_is_ordered() {
    let app = TestApp::new().await;
    app.cleanup().await;

    for (name, email) in [("u1", "u1@x.com"), ("u2", "u2@x.com"), ("u3", "u3@x.com")] {
        let (status, _, _) = app
            .post(
                "/api/register",
                &format!(r#"{{"username":"{}","email":"{}","password":"pw"}}"#, name, email),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, _, set_cookie) = app
        .post("/api/login", r#"{"username":"u1","password":"pw"}"#)
        .await;
    let cookie = cookie_pair(&set_cookie.unwrap());

    let (status, body) = app.get("/api/users", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);

    let pos1 = body.find("u1").unwrap();
    let pos2 = body.find("u2").unwrap();
    let pos3 = body.find("u3").unwrap();
    assert!(pos1 < pos2 && pos2 < pos3);
}
