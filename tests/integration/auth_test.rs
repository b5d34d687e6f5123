//! Registration, login, and RBAC integration tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "password": "hunter2hunter2" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "User");

    let token = app.login("alice", "hunter2hunter2").await;
    assert!(!token.is_empty());

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.register_and_login("bob", "hunter2hunter2").await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "username": "bob", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "AUTHENTICATION");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    app.register_and_login("carol", "hunter2hunter2").await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "username": "carol", "password": "other-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "username": "dave", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_admin_requires_admin_role() {
    let app = TestApp::new().await;
    let user_token = app.register_and_login("erin", "hunter2hunter2").await;

    let (status, _) = app
        .post(
            "/api/auth/register-admin",
            Some(&user_token),
            json!({ "username": "frank", "password": "hunter2hunter2" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = app.seed_admin("root-admin", "admin-password").await;
    let (status, body) = app
        .post(
            "/api/auth/register-admin",
            Some(&admin_token),
            json!({ "username": "frank", "password": "hunter2hunter2" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Administrator");
}

#[tokio::test]
async fn test_protected_routes_require_a_token() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/tree/nodes", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/tree/nodes", Some("not-a-valid-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "connected");
}
