//! Service-level operations: upgrade flow, instance lookups, and the
//! load-balancer configuration update.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::ports::{ApiTransport, Clock, ProgressReporter};
use crate::application::services::{locate, merge, waiter};
use crate::domain::{ApiConfig, LookupError};

/// Upgrade a service addressed by its `svc.stack.domain` locator, waiting
/// through the `upgraded` and `healthy` states before finishing the
/// two-phase upgrade.
///
/// `overrides` is shallow-merged over the service's current definition to
/// form the upgrade payload.
///
/// # Errors
///
/// Fails on transport errors, an unknown locator, or wait timeouts.
pub fn upgrade_service(
    api: &impl ApiTransport,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    config: &ApiConfig,
    locator: &str,
    overrides: Option<&Value>,
) -> Result<()> {
    let service_id = locate::resolve_locator(api, locator)?;

    reporter.step(&format!("Initializing upgrade of service {service_id}..."));
    let mut payload = api.get(&format!("v1/services/{service_id}"))?;
    if let (Value::Object(base), Some(Value::Object(extra))) = (&mut payload, overrides) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    api.post(&format!("v1/services/{service_id}?action=upgrade"), &payload)?;

    reporter.step(&format!("Waiting until service {service_id} is upgraded..."));
    wait_for_service_field(api, clock, &service_id, "state", "upgraded", config.timeouts.upgrade)?;
    reporter.step(&format!("Waiting until service {service_id} is healthy..."));
    wait_for_service_field(
        api,
        clock,
        &service_id,
        "healthState",
        "healthy",
        config.timeouts.healthy,
    )?;
    api.post(
        &format!("v1/services/{service_id}?action=finishupgrade"),
        &json!({}),
    )?;
    reporter.success(&format!("Service {service_id} upgraded"));
    Ok(())
}

/// Update a load balancer's configuration in place: fetch the current
/// document, deep-merge the patch (conflicts abort), and PUT the result.
///
/// # Errors
///
/// Fails on transport errors or a [`crate::domain::MergeError`].
pub fn update_load_balancer(
    api: &impl ApiTransport,
    config: &ApiConfig,
    lb_id: &str,
    patch: &Value,
) -> Result<()> {
    let current = api.get(&format!("v2-beta/loadbalancerservices/{lb_id}"))?;
    let merged = merge::deep_merge(current, patch)?;
    api.put(
        &format!(
            "v2-beta/projects/{}/loadbalancerservices/{lb_id}",
            config.project_id()?
        ),
        &merged,
    )?;
    Ok(())
}

/// The running instances of a service.
///
/// # Errors
///
/// Fails on transport errors; an empty list is
/// [`LookupError::NoInstances`].
pub fn service_instances(api: &impl ApiTransport, service_id: &str) -> Result<Vec<Value>> {
    let body = api.get(&format!("v1/services/{service_id}/instances"))?;
    let instances: Vec<Value> = body
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if instances.is_empty() {
        return Err(LookupError::NoInstances(service_id.to_string()).into());
    }
    Ok(instances)
}

/// Container id (the runtime's external id) of the service's first
/// instance.
///
/// # Errors
///
/// Fails when the service has no instances or the entry is malformed.
pub fn first_container_id(api: &impl ApiTransport, service_id: &str) -> Result<String> {
    let instances = service_instances(api, service_id)?;
    instances
        .first()
        .and_then(|i| i.get("externalId").and_then(Value::as_str))
        .map(str::to_string)
        .with_context(|| format!("instance of service {service_id} has no externalId"))
}

/// Public IP of the host running the service's first instance.
///
/// # Errors
///
/// Fails when the service has no instances or the host exposes no public
/// endpoints.
pub fn first_instance_host_ip(api: &impl ApiTransport, service_id: &str) -> Result<String> {
    let instances = service_instances(api, service_id)?;
    let host_id = instances
        .first()
        .and_then(|i| i.get("hostId").and_then(Value::as_str))
        .with_context(|| format!("instance of service {service_id} has no hostId"))?;
    host_ip(api, host_id)
}

/// Public IP of a host, taken from its first public endpoint.
///
/// # Errors
///
/// Fails when the host exposes no public endpoints.
pub fn host_ip(api: &impl ApiTransport, host_id: &str) -> Result<String> {
    let body = api.get(&format!("v1/hosts/{host_id}"))?;
    body.pointer("/publicEndpoints/0/ipAddress")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LookupError::NoPublicEndpoints(host_id.to_string()).into())
}

/// Host public endpoints, as reservations for the free-port scan.
///
/// # Errors
///
/// Fails on transport errors or a malformed endpoint list.
pub fn host_endpoints(
    api: &impl ApiTransport,
    host_id: &str,
) -> Result<Vec<crate::domain::PublicEndpoint>> {
    let body = api.get(&format!("v1/hosts/{host_id}"))?;
    let Some(endpoints) = body.get("publicEndpoints").filter(|e| !e.is_null()) else {
        return Ok(Vec::new());
    };
    serde_json::from_value(endpoints.clone())
        .with_context(|| format!("unparseable public endpoints on host {host_id}"))
}

fn wait_for_service_field(
    api: &impl ApiTransport,
    clock: &impl Clock,
    service_id: &str,
    field: &str,
    expected: &str,
    timeout_secs: u64,
) -> Result<()> {
    waiter::wait_for(
        clock,
        &format!("service {service_id}"),
        expected,
        Duration::from_secs(timeout_secs),
        || {
            let body = api.get(&format!("v1/services/{service_id}"))?;
            Ok(body
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string())
        },
    )
}
