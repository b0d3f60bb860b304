//! Integration tests for the route gate.

use axum::http::StatusCode;

use hostel_entity::account::Role;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_public_api_needs_no_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "in-memory");
}

#[tokio::test]
async fn test_public_page_ignores_bad_token() {
    let app = TestApp::new();

    let response = app.visit("/hostels/42", Some("not-a-jwt")).await;

    // Allowed through; nothing is mounted there.
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_without_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/account/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("UNAUTHORIZED"));
    assert!(response.location().is_none());
}

#[tokio::test]
async fn test_api_with_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/account/me", None, Some("abc.def.ghi"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_page_without_token_redirects_to_role_login() {
    let app = TestApp::new();

    let student = app.visit("/student/dashboard", None).await;
    let owner = app.visit("/owner/listings", None).await;
    let admin = app.visit("/admin/dashboard", None).await;

    assert_eq!(student.status, StatusCode::SEE_OTHER);
    assert_eq!(student.location(), Some("/student/login"));
    assert_eq!(owner.location(), Some("/owner/login"));
    assert_eq!(admin.location(), Some("/admin/login"));
}

#[tokio::test]
async fn test_unmatched_page_redirects_to_generic_login() {
    let app = TestApp::new();

    let response = app.visit("/settings", None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_unmatched_page_allows_any_role() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::HostelOwner, "owner@example.com").await;

    let response = app.visit("/settings", Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_page_allows_matching_role() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student, "ada@example.com").await;

    let response = app.visit("/student/dashboard", Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_mismatch_page_redirects_home() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student, "ada@example.com").await;

    let response = app.visit("/admin/dashboard", Some(&token)).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/student/dashboard"));
}

#[tokio::test]
async fn test_role_mismatch_api_is_forbidden() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::HostelOwner, "owner@example.com").await;

    let response = app
        .request("GET", "/api/admin/accounts", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("FORBIDDEN"));
}

#[tokio::test]
async fn test_prefix_match_respects_segments() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student, "ada@example.com").await;

    // `/administrator` is not under `/admin`, so it falls to the default rule.
    let response = app.visit("/administrator", Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_page_stays_public_under_role_area() {
    let app = TestApp::new();

    let response = app.visit("/admin/login", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_api_route_is_json_not_found() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student, "ada@example.com").await;

    let response = app.request("GET", "/api/nope", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("NOT_FOUND"));
}
