//! Stack lifecycle orchestration: create, upgrade, remove.
//!
//! Each mutating action puts the stack into a transient state; the waiter
//! then blocks until the expected terminal state (or times out). Compose
//! documents arrive as opaque text blobs, forwarded verbatim — the client
//! never parses them.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::ports::{ApiTransport, Clock, ProgressReporter};
use crate::application::services::{locate, waiter};
use crate::domain::{ApiConfig, ApiError};

/// Everything needed to create or upgrade a stack. Compose fields hold the
/// document contents, not paths.
#[derive(Debug, Clone)]
pub struct StackSpec<'a> {
    pub name: &'a str,
    /// Deployment descriptor (required).
    pub docker_compose: &'a str,
    /// Platform-specific descriptor; empty when none was supplied.
    pub rancher_compose: &'a str,
    /// Comma-separated stack tags.
    pub tags: Option<&'a str>,
}

/// Create a stack and wait until it is active and healthy.
///
/// A `NotUnique` conflict from the platform means the stack already exists;
/// the call then falls back to the upgrade flow instead of failing.
///
/// # Errors
///
/// Fails on transport errors or wait timeouts.
pub fn create_stack(
    api: &impl ApiTransport,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    config: &ApiConfig,
    spec: &StackSpec<'_>,
) -> Result<()> {
    reporter.step(&format!("Creating stack {}...", spec.name));
    let payload = json!({
        "type": "stack",
        "startOnCreate": true,
        "name": spec.name,
        "group": spec.tags,
        "dockerCompose": spec.docker_compose,
        "rancherCompose": spec.rancher_compose,
    });

    let endpoint = format!("v2-beta/projects/{}/stack", config.project_id()?);
    if let Err(err) = api.post(&endpoint, &payload) {
        if !is_not_unique(&err) {
            return Err(err);
        }
        reporter.step("Stack already exists, upgrading it instead...");
        return upgrade_stack(api, clock, reporter, config, spec);
    }

    let stack_id = locate::stack_id_by_name(api, spec.name)?;
    wait_for_stack_state(api, clock, reporter, &stack_id, "active", config.timeouts.active)?;
    wait_for_stack_health(api, clock, reporter, &stack_id, config.timeouts.healthy)?;
    reporter.success(&format!("Stack {} created", spec.name));
    Ok(())
}

/// Upgrade a stack: init, wait `upgraded`, finish (two-phase commit), wait
/// healthy.
///
/// # Errors
///
/// Fails on transport errors or wait timeouts.
pub fn upgrade_stack(
    api: &impl ApiTransport,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    config: &ApiConfig,
    spec: &StackSpec<'_>,
) -> Result<()> {
    let stack_id = locate::stack_id_by_name(api, spec.name)?;

    reporter.step(&format!("Initializing stack {} upgrade...", spec.name));
    let payload = json!({
        "type": "environment",
        "startOnCreate": true,
        "name": spec.name,
        "dockerCompose": spec.docker_compose,
        "rancherCompose": spec.rancher_compose,
    });
    api.post(&format!("v1/environments/{stack_id}?action=upgrade"), &payload)?;

    wait_for_stack_state(api, clock, reporter, &stack_id, "upgraded", config.timeouts.upgrade)?;
    api.post(
        &format!("v1/environments/{stack_id}?action=finishupgrade"),
        &json!({}),
    )?;
    wait_for_stack_health(api, clock, reporter, &stack_id, config.timeouts.healthy)?;
    reporter.success(&format!("Stack {} upgraded", spec.name));
    Ok(())
}

/// Remove a stack by name.
///
/// # Errors
///
/// Fails when the stack does not exist or the remove action is rejected.
pub fn remove_stack(api: &impl ApiTransport, name: &str) -> Result<()> {
    let stack_id = locate::stack_id_by_name(api, name)?;
    api.post(&format!("v1/environments/{stack_id}?action=remove"), &json!({}))
        .context("Could not remove stack")?;
    Ok(())
}

// ── State polling ─────────────────────────────────────────────────────────────

fn wait_for_stack_state(
    api: &impl ApiTransport,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    stack_id: &str,
    expected: &str,
    timeout_secs: u64,
) -> Result<()> {
    reporter.step(&format!("Waiting until stack {stack_id} becomes {expected}..."));
    waiter::wait_for(
        clock,
        &format!("stack {stack_id}"),
        expected,
        Duration::from_secs(timeout_secs),
        || stack_field(api, stack_id, "state"),
    )
}

fn wait_for_stack_health(
    api: &impl ApiTransport,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    stack_id: &str,
    timeout_secs: u64,
) -> Result<()> {
    reporter.step(&format!("Waiting until stack {stack_id} becomes healthy..."));
    waiter::wait_for(
        clock,
        &format!("stack {stack_id}"),
        "healthy",
        Duration::from_secs(timeout_secs),
        || stack_field(api, stack_id, "healthState"),
    )
}

fn stack_field(api: &impl ApiTransport, stack_id: &str, field: &str) -> Result<String> {
    let body = api.get(&format!("v1/environments/{stack_id}"))?;
    Ok(body
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Whether an API failure is the platform's "already exists" conflict.
fn is_not_unique(err: &anyhow::Error) -> bool {
    let Some(ApiError::Status { body, .. }) = err.downcast_ref::<ApiError>() else {
        return false;
    };
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("code").and_then(Value::as_str).map(str::to_string))
        .is_some_and(|code| code == "NotUnique")
}
