//! Service upgrade flow and instance/host lookups.

#![allow(clippy::expect_used)]

use serde_json::{Value, json};

use linkctl_cli::application::services::services;
use linkctl_cli::domain::{LookupError, MergeError};

use crate::mocks::{FakeClock, MockApi, NullReporter, test_config};

const ENVIRONMENTS: &str = "v1/environments?limit=-1";
const STACK_SERVICES: &str = "v1/environments/1st7/services";
const SERVICE: &str = "v1/services/1s42";
const UPGRADE: &str = "v1/services/1s42?action=upgrade";
const FINISH: &str = "v1/services/1s42?action=finishupgrade";
const INSTANCES: &str = "v1/services/1s42/instances";

#[test]
fn upgrade_merges_overrides_and_finishes() {
    let api = MockApi::new()
        .on("GET", ENVIRONMENTS, json!({"data": [{"id": "1e7", "name": "staging"}]}))
        .on("GET", STACK_SERVICES, json!({"data": [{"id": "1s42", "name": "api"}]}))
        .on_seq(
            "GET",
            SERVICE,
            vec![
                json!({"id": "1s42", "scale": 1, "state": "active", "healthState": "healthy"}),
                json!({"state": "upgraded", "healthState": "degraded"}),
                json!({"state": "upgraded", "healthState": "healthy"}),
            ],
        )
        .on("POST", UPGRADE, Value::Null)
        .on("POST", FINISH, Value::Null);
    let clock = FakeClock::new();

    services::upgrade_service(
        &api,
        &clock,
        &NullReporter,
        &test_config(),
        "api.staging.example.com",
        Some(&json!({"scale": 3})),
    )
    .expect("upgrade");

    let posts = api.posts_to(UPGRADE);
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["scale"], json!(3), "override must win");
    assert_eq!(posts[0]["id"], json!("1s42"), "current definition is the base");
    assert_eq!(api.posts_to(FINISH).len(), 1);
}

#[test]
fn instance_lookups_use_the_first_instance() {
    let api = MockApi::new()
        .on(
            "GET",
            INSTANCES,
            json!({"data": [
                {"externalId": "docker-abc123", "hostId": "1h9"},
                {"externalId": "docker-def456", "hostId": "1h10"},
            ]}),
        )
        .on(
            "GET",
            "v1/hosts/1h9",
            json!({"publicEndpoints": [{"port": 80, "ipAddress": "203.0.113.7"}]}),
        );

    assert_eq!(
        services::first_container_id(&api, "1s42").expect("container id"),
        "docker-abc123"
    );
    assert_eq!(
        services::first_instance_host_ip(&api, "1s42").expect("host ip"),
        "203.0.113.7"
    );
}

#[test]
fn no_instances_is_a_typed_error() {
    let api = MockApi::new().on("GET", INSTANCES, json!({"data": []}));
    let err = services::first_container_id(&api, "1s42").expect_err("no instances");
    assert!(matches!(
        err.downcast_ref::<LookupError>(),
        Some(LookupError::NoInstances(id)) if id == "1s42"
    ));
}

#[test]
fn host_without_public_endpoints_is_a_typed_error() {
    let api = MockApi::new().on("GET", "v1/hosts/1h9", json!({"publicEndpoints": []}));
    let err = services::host_ip(&api, "1h9").expect_err("no endpoints");
    assert!(matches!(
        err.downcast_ref::<LookupError>(),
        Some(LookupError::NoPublicEndpoints(id)) if id == "1h9"
    ));
}

#[test]
fn lb_update_merges_the_patch_into_the_current_document() {
    let api = MockApi::new()
        .on(
            "GET",
            "v2-beta/loadbalancerservices/1s100",
            json!({"name": "lb", "lbConfig": {"portRules": [{"sourcePort": 80}]}}),
        )
        .on("PUT", "v2-beta/projects/1a5/loadbalancerservices/1s100", Value::Null);

    services::update_load_balancer(
        &api,
        &test_config(),
        "1s100",
        &json!({"lbConfig": {"portRules": [{"sourcePort": 443}]}}),
    )
    .expect("update");

    let requests = api.requests.borrow();
    let put = requests.iter().find(|r| r.method == "PUT").expect("PUT issued");
    assert_eq!(
        put.body.clone().expect("body"),
        json!({"name": "lb", "lbConfig": {"portRules": [
            {"sourcePort": 80},
            {"sourcePort": 443},
        ]}})
    );
}

#[test]
fn lb_update_surfaces_merge_conflicts() {
    let api = MockApi::new().on(
        "GET",
        "v2-beta/loadbalancerservices/1s100",
        json!({"lbConfig": {"config": "timeout 30"}}),
    );

    let err = services::update_load_balancer(
        &api,
        &test_config(),
        "1s100",
        &json!({"lbConfig": {"config": "timeout 60"}}),
    )
    .expect_err("conflict");
    assert_eq!(
        err.downcast_ref::<MergeError>(),
        Some(&MergeError::Conflict {
            path: "lbConfig.config".to_string()
        })
    );
}
