//! Integration tests for startup configuration checks.

use std::sync::Arc;

use hostel_api::AppState;
use hostel_core::config::{AppConfig, RouteAccess, RouteRule};
use hostel_core::error::ErrorKind;
use hostel_database::{AccountStore, MemoryAccountStore};

fn store() -> Arc<dyn AccountStore> {
    Arc::new(MemoryAccountStore::new())
}

fn config_with_secret() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
    config
}

#[test]
fn test_empty_secret_refuses_to_start() {
    let config = AppConfig::default();
    assert!(config.auth.jwt_secret.is_empty());

    let err = AppState::check_config(&config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);

    let err = AppState::build(config, store(), None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_duplicate_gate_prefix_refuses_to_start() {
    let mut config = config_with_secret();
    config
        .gate
        .rules
        .push(RouteRule::new("/admin/", RouteAccess::Student));

    let err = AppState::check_config(&config).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
    assert!(err.message.contains("/admin"));

    let err = AppState::build(config, store(), None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[test]
fn test_valid_config_passes_checks() {
    let config = config_with_secret();
    assert!(AppState::check_config(&config).is_ok());
    assert!(AppState::build(config, store(), None).is_ok());
}
