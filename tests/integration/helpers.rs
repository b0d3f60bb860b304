//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use hostel_api::AppState;
use hostel_auth::password::{PasswordHasher, PasswordValidator};
use hostel_core::config::AppConfig;
use hostel_core::types::AccountId;
use hostel_database::{AccountStore, MemoryAccountStore};
use hostel_entity::account::{Account, ProfileUpdate, Role};
use hostel_service::{AccountFactory, CreateAccountRequest};

/// Password that satisfies the default strength policy.
pub const STRONG_PASSWORD: &str = "Tr1cky-Lantern-Orbit";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct access to the session manager
    pub state: AppState,
    /// Backing account store
    pub store: MemoryAccountStore,
    /// Application config
    pub config: AppConfig,
}

/// A buffered response
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// JSON body, or `Null` when the body is empty or not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header value, if any
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(SET_COOKIE).and_then(|v| v.to_str().ok())
    }

    /// The `Location` header value, if any
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// The `error` code of a JSON error body
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

impl TestApp {
    /// Create a new test application on an empty in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();

        let store = MemoryAccountStore::new();
        let shared: Arc<dyn AccountStore> = Arc::new(store.clone());
        let state = AppState::build(config.clone(), shared, None).expect("Failed to build state");
        let router = hostel_api::build_app(state.clone());

        Self {
            router,
            state,
            store,
            config,
        }
    }

    /// Insert an active account directly into the store
    pub async fn seed(&self, role: Role, email: &str, password: &str) -> Account {
        let factory = AccountFactory::new(
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&self.config.auth)),
        );
        let new_account = factory
            .build(CreateAccountRequest {
                email: email.to_string(),
                password: password.to_string(),
                role,
                full_name: "Test Account".to_string(),
                details: ProfileUpdate::default(),
            })
            .expect("Failed to build account");
        self.store
            .create(new_account)
            .await
            .expect("Failed to seed account")
    }

    /// Send a request, optionally with a JSON body and a bearer token
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("Failed to build request"))
            .await
    }

    /// Send a JSON request whose body is the given raw text
    pub async fn request_raw(&self, method: &str, uri: &str, raw: &'static str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Navigate to a page the way a browser does, carrying the session cookie
    pub async fn visit(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(
                COOKIE,
                format!("{}={token}", self.config.session.cookie_name),
            );
        }
        self.send(builder.body(Body::empty()).expect("Failed to build request"))
            .await
    }

    /// Log in and return the full response
    pub async fn login_response(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": email,
                "password": password,
                "remember_me": remember_me,
            })),
            None,
        )
        .await
    }

    /// Log in and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self.login_response(email, password, false).await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Seed an account of `role` and log it in
    pub async fn signed_in(&self, role: Role, email: &str) -> (AccountId, String) {
        let account = self.seed(role, email, STRONG_PASSWORD).await;
        let token = self.login(email, STRONG_PASSWORD).await;
        (account.id, token)
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
