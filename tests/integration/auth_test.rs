//! Integration tests for the login, logout, register and me flows.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use hostel_auth::JwtEncoder;
use hostel_database::AccountStore;
use hostel_entity::account::{AccountStatus, Role};

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_login_sets_day_long_cookie() {
    let app = TestApp::new();
    let account = app
        .seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;

    let response = app
        .login_response("ada@example.com", STRONG_PASSWORD, false)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.set_cookie().expect("session cookie");
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));

    let data = &response.body["data"];
    assert_eq!(data["redirect_to"], "/student/dashboard");
    assert_eq!(data["user"]["email"], "ada@example.com");
    assert_eq!(data["user"]["role"], "student");
    assert!(data["user"].get("password_hash").is_none());

    let claims = app
        .state
        .sessions
        .resolve(data["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.role, Role::Student);
    let remaining = claims.expires_at() - Utc::now();
    assert!(remaining > Duration::hours(23) && remaining <= Duration::hours(24));
}

#[tokio::test]
async fn test_remember_me_extends_to_seven_days() {
    let app = TestApp::new();
    app.seed(Role::HostelOwner, "owner@example.com", STRONG_PASSWORD)
        .await;

    let response = app
        .login_response("owner@example.com", STRONG_PASSWORD, true)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie().unwrap().contains("Max-Age=604800"));
    assert_eq!(response.body["data"]["redirect_to"], "/owner/dashboard");

    let claims = app
        .state
        .sessions
        .resolve(response.body["data"]["token"].as_str().unwrap())
        .unwrap();
    let remaining = claims.expires_at() - Utc::now();
    assert!(remaining > Duration::days(6) && remaining <= Duration::days(7));
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new();
    app.seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;

    let response = app
        .login_response("  ADA@Example.com ", STRONG_PASSWORD, false)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_email_case_folding_covers_non_ascii() {
    let app = TestApp::new();
    app.seed(Role::Student, "ada@éxample.com", STRONG_PASSWORD)
        .await;

    let response = app
        .login_response("ADA@ÉXAMPLE.COM", STRONG_PASSWORD, false)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::new();
    app.seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;

    let wrong_password = app
        .login_response("ada@example.com", "not-the-password", false)
        .await;
    let unknown_email = app
        .login_response("nobody@example.com", STRONG_PASSWORD, false)
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["message"], "Invalid email or password");
    assert!(wrong_password.set_cookie().is_none());
}

#[tokio::test]
async fn test_inactive_account_cannot_login() {
    let app = TestApp::new();
    let account = app
        .seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;
    app.store
        .update_status(account.id, AccountStatus::Inactive)
        .await
        .unwrap();

    let correct = app
        .login_response("ada@example.com", STRONG_PASSWORD, false)
        .await;
    assert_eq!(correct.status, StatusCode::FORBIDDEN);
    assert!(correct.set_cookie().is_none());

    let wrong = app
        .login_response("ada@example.com", "not-the-password", false)
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_records_last_login() {
    let app = TestApp::new();
    let account = app
        .seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;
    assert!(account.last_login_at.is_none());

    app.login("ada@example.com", STRONG_PASSWORD).await;

    let stored = app.store.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn test_malformed_login_body_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request_raw("POST", "/api/auth/login", "{\"email\": ")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student, "ada@example.com").await;

    let first = app.request("POST", "/api/auth/logout", None, Some(&token)).await;
    let second = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    let cleared = first.set_cookie().expect("cleared cookie");
    assert_eq!(Some(cleared), second.set_cookie());
    assert!(cleared.starts_with("auth_token=;"));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_me_reports_claims_and_account() {
    let app = TestApp::new();
    let (id, token) = app.signed_in(Role::HostelOwner, "owner@example.com").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["account_id"], id.to_string());
    assert_eq!(data["role"], "hostel-owner");
    assert_eq!(data["email"], "owner@example.com");
    assert_eq!(data["account"]["status"], "active");
}

#[tokio::test]
async fn test_me_with_cookie_only() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student, "ada@example.com").await;

    let response = app.visit("/api/auth/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    let account = app
        .seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;

    let encoder = JwtEncoder::new(&app.config.auth, &app.config.session).unwrap();
    let stale = encoder
        .issue_at(
            account.id,
            Role::Student,
            &account.email,
            false,
            Utc::now() - Duration::hours(25),
        )
        .unwrap();

    let response = app
        .request("GET", "/api/auth/me", None, Some(&stale.token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_deactivation_applies_to_live_sessions() {
    let app = TestApp::new();
    let (id, token) = app.signed_in(Role::Student, "ada@example.com").await;

    app.store
        .update_status(id, AccountStatus::Inactive)
        .await
        .unwrap();

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_student() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "New.Student@Example.com",
                "password": STRONG_PASSWORD,
                "role": "student",
                "full_name": "New Student",
                "university": "UNILAG",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["email"], "new.student@example.com");
    assert_eq!(data["profile"]["university"], "UNILAG");

    app.login("new.student@example.com", STRONG_PASSWORD).await;
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "ADA@example.com",
                "password": STRONG_PASSWORD,
                "role": "hostel-owner",
                "full_name": "Second Ada",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_register_rejects_admin_role() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "root@example.com",
                "password": STRONG_PASSWORD,
                "role": "admin",
                "full_name": "Root",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "email": "ada@example.com",
                "password": "password",
                "role": "student",
                "full_name": "Ada Obi",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_change_password_then_login() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student, "ada@example.com").await;
    let new_password = "Quiet-Harbor-Lamp-42";

    let wrong = app
        .request(
            "PUT",
            "/api/account/me/password",
            Some(json!({
                "current_password": "not-the-password",
                "new_password": new_password,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let changed = app
        .request(
            "PUT",
            "/api/account/me/password",
            Some(json!({
                "current_password": STRONG_PASSWORD,
                "new_password": new_password,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    let old = app
        .login_response("ada@example.com", STRONG_PASSWORD, false)
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    app.login("ada@example.com", new_password).await;
}

#[tokio::test]
async fn test_profile_update_rejects_foreign_fields() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student, "ada@example.com").await;

    let ok = app
        .request(
            "PUT",
            "/api/account/me",
            Some(json!({ "phone": "0800 000 0000" })),
            Some(&token),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"]["profile"]["phone"], "0800 000 0000");

    let foreign = app
        .request(
            "PUT",
            "/api/account/me",
            Some(json!({ "business_name": "Acme Lodges" })),
            Some(&token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::BAD_REQUEST);
}
