//! Name → identifier resolution against the platform API.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::application::ports::ApiTransport;
use crate::domain::{LookupError, ServiceLocator};

/// Resolve a stack (environment) name to its stack id.
///
/// # Errors
///
/// Fails on transport errors or when no stack carries `name`.
pub fn stack_id_by_name(api: &impl ApiTransport, name: &str) -> Result<String> {
    try_stack_id_by_name(api, name)?
        .ok_or_else(|| LookupError::StackNotFound(name.to_string()).into())
}

/// Like [`stack_id_by_name`], but a missing stack yields `None`.
///
/// # Errors
///
/// Fails on transport errors only.
pub fn try_stack_id_by_name(api: &impl ApiTransport, name: &str) -> Result<Option<String>> {
    let body = api.get("v1/environments?limit=-1")?;
    for environment in items(&body) {
        if environment.get("name").and_then(Value::as_str) == Some(name) {
            let id = environment
                .get("id")
                .and_then(Value::as_str)
                .context("environment entry without an id")?;
            // The platform exposes the same resource under an environment id
            // ("1e5") on one endpoint family and a stack id ("1st5") on the
            // other; rewrite between them.
            return Ok(Some(id.replace('e', "st")));
        }
    }
    Ok(None)
}

/// Resolve a service name within a stack to its service id.
///
/// # Errors
///
/// Fails on transport errors or when the stack has no such service.
pub fn service_id_by_name(api: &impl ApiTransport, stack_id: &str, name: &str) -> Result<String> {
    let body = api.get(&format!("v1/environments/{stack_id}/services"))?;
    for service in items(&body) {
        if service.get("name").and_then(Value::as_str) == Some(name) {
            let id = service
                .get("id")
                .and_then(Value::as_str)
                .context("service entry without an id")?;
            return Ok(id.to_string());
        }
    }
    Err(LookupError::ServiceNotFound(name.to_string()).into())
}

/// Resolve a `"<service>.<stack>.<domain>"` locator to a service id.
///
/// # Errors
///
/// Fails when the locator is malformed or either lookup misses.
pub fn resolve_locator(api: &impl ApiTransport, locator: &str) -> Result<String> {
    let parsed: ServiceLocator = locator.parse()?;
    let stack_id = stack_id_by_name(api, &parsed.stack)?;
    service_id_by_name(api, &stack_id, &parsed.service)
}

/// Like [`resolve_locator`], but a missing stack or service yields `None`.
///
/// # Errors
///
/// Fails when the locator is malformed or on transport errors.
pub fn try_resolve_locator(api: &impl ApiTransport, locator: &str) -> Result<Option<String>> {
    let parsed: ServiceLocator = locator.parse()?;
    let Some(stack_id) = try_stack_id_by_name(api, &parsed.stack)? else {
        return Ok(None);
    };
    match service_id_by_name(api, &stack_id, &parsed.service) {
        Ok(id) => Ok(Some(id)),
        Err(err) if err.is::<LookupError>() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Iterate the `data` array of a collection response.
fn items(body: &Value) -> impl Iterator<Item = &Value> {
    body.get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}
