//! Name → identifier resolution tests.

#![allow(clippy::expect_used)]

use serde_json::json;

use linkctl_cli::application::services::locate;
use linkctl_cli::domain::{LocatorError, LookupError};

use crate::mocks::MockApi;

const ENVIRONMENTS: &str = "v1/environments?limit=-1";
const SERVICES: &str = "v1/environments/1st7/services";

fn api() -> MockApi {
    MockApi::new()
        .on(
            "GET",
            ENVIRONMENTS,
            json!({"data": [
                {"id": "1e7", "name": "staging"},
                {"id": "1e9", "name": "production"},
            ]}),
        )
        .on(
            "GET",
            SERVICES,
            json!({"data": [
                {"id": "1s42", "name": "api"},
                {"id": "1s43", "name": "worker"},
            ]}),
        )
}

#[test]
fn stack_id_rewrites_the_environment_id() {
    assert_eq!(
        locate::stack_id_by_name(&api(), "staging").expect("lookup"),
        "1st7"
    );
}

#[test]
fn unknown_stack_is_a_typed_error() {
    let err = locate::stack_id_by_name(&api(), "nope").expect_err("missing");
    assert!(matches!(
        err.downcast_ref::<LookupError>(),
        Some(LookupError::StackNotFound(name)) if name == "nope"
    ));
}

#[test]
fn missing_ok_mode_returns_none_instead() {
    assert_eq!(locate::try_stack_id_by_name(&api(), "nope").expect("lookup"), None);
}

#[test]
fn locator_resolves_service_within_its_stack() {
    assert_eq!(
        locate::resolve_locator(&api(), "api.staging.example.com").expect("resolve"),
        "1s42"
    );
}

#[test]
fn unknown_service_in_a_known_stack_is_an_error() {
    let err = locate::resolve_locator(&api(), "ghost.staging.example.com").expect_err("missing");
    assert!(matches!(
        err.downcast_ref::<LookupError>(),
        Some(LookupError::ServiceNotFound(name)) if name == "ghost"
    ));
}

#[test]
fn malformed_locator_fails_before_any_request() {
    let api = MockApi::new();
    let err = locate::resolve_locator(&api, "plainhostname").expect_err("malformed");
    assert!(err.downcast_ref::<LocatorError>().is_some());
    assert!(api.requests.borrow().is_empty());
}

#[test]
fn try_resolve_tolerates_missing_pieces() {
    assert_eq!(
        locate::try_resolve_locator(&api(), "ghost.staging.example.com").expect("resolve"),
        None
    );
    assert_eq!(
        locate::try_resolve_locator(&api(), "api.nope.example.com").expect("resolve"),
        None
    );
    assert_eq!(
        locate::try_resolve_locator(&api(), "api.staging.example.com").expect("resolve"),
        Some("1s42".to_string())
    );
}
