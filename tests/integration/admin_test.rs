//! Integration tests for admin account management.

use axum::http::StatusCode;
use serde_json::json;

use hostel_core::types::AccountId;
use hostel_database::AccountStore;
use hostel_entity::account::{AccountStatus, Role};

use crate::helpers::{STRONG_PASSWORD, TestApp};

#[tokio::test]
async fn test_admin_lists_accounts_with_filter() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;
    app.seed(Role::Student, "s1@example.com", STRONG_PASSWORD).await;
    app.seed(Role::Student, "s2@example.com", STRONG_PASSWORD).await;
    app.seed(Role::HostelOwner, "o1@example.com", STRONG_PASSWORD)
        .await;

    let all = app
        .request("GET", "/api/admin/accounts", None, Some(&admin))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"]["total"], 4);

    let students = app
        .request(
            "GET",
            "/api/admin/accounts?role=student&per_page=1",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(students.status, StatusCode::OK);
    assert_eq!(students.body["data"]["total"], 2);
    assert_eq!(students.body["data"]["total_pages"], 2);
    assert_eq!(students.body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_list_far_past_last_page_is_empty() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;

    let response = app
        .request(
            "GET",
            "/api/admin/accounts?page=18446744073709551615&per_page=100",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 1);
    assert!(response.body["data"]["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_creates_any_role() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/admin/accounts",
            Some(json!({
                "email": "second-admin@example.com",
                "password": STRONG_PASSWORD,
                "role": "admin",
                "full_name": "Second Admin",
            })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["role"], "admin");
    app.login("second-admin@example.com", STRONG_PASSWORD).await;
}

#[tokio::test]
async fn test_admin_get_unknown_account_is_not_found() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;

    let uri = format!("/api/admin/accounts/{}", AccountId::new());
    let response = app.request("GET", &uri, None, Some(&admin)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_bad_id_is_bad_request() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;

    let response = app
        .request("GET", "/api/admin/accounts/not-a-uuid", None, Some(&admin))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_deactivates_and_reactivates() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;
    let (student_id, student) = app.signed_in(Role::Student, "ada@example.com").await;
    let uri = format!("/api/admin/accounts/{student_id}/status");

    let response = app
        .request("PUT", &uri, Some(json!({ "status": "inactive" })), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "inactive");

    let me = app.request("GET", "/api/auth/me", None, Some(&student)).await;
    assert_eq!(me.status, StatusCode::FORBIDDEN);

    let response = app
        .request("PUT", &uri, Some(json!({ "status": "active" })), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let me = app.request("GET", "/api/auth/me", None, Some(&student)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_cannot_set_deleted_through_status() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;
    let student = app
        .seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/accounts/{}/status", student.id),
            Some(json!({ "status": "deleted" })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_cannot_deactivate_self() {
    let app = TestApp::new();
    let (admin_id, admin) = app.signed_in(Role::Admin, "root@example.com").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/accounts/{admin_id}/status"),
            Some(json!({ "status": "inactive" })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = TestApp::new();
    let (admin_id, admin) = app.signed_in(Role::Admin, "root@example.com").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/accounts/{admin_id}"),
            None,
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.store.find_by_id(admin_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_soft_delete_ends_sessions_and_login() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;
    let (student_id, student) = app.signed_in(Role::Student, "ada@example.com").await;
    let uri = format!("/api/admin/accounts/{student_id}");

    let response = app.request("DELETE", &uri, None, Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    let stored = app.store.find_by_id(student_id).await.unwrap().unwrap();
    assert_eq!(stored.status, AccountStatus::Deleted);

    let me = app.request("GET", "/api/auth/me", None, Some(&student)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    let login = app
        .login_response("ada@example.com", STRONG_PASSWORD, false)
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let again = app.request("DELETE", &uri, None, Some(&admin)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hard_delete_removes_row() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin, "root@example.com").await;
    let student = app
        .seed(Role::Student, "ada@example.com", STRONG_PASSWORD)
        .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/accounts/{}?hard=true", student.id),
            None,
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(app.store.find_by_id(student.id).await.unwrap().is_none());
}
