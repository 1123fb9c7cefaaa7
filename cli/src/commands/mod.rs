//! Command implementations

pub mod add_link;
pub mod create_stack;
pub mod dns;
pub mod get_port;
pub mod remove_link;
pub mod remove_stack;
pub mod resolve;
pub mod service_port;
pub mod update_lb;
pub mod upgrade_service;

use anyhow::Result;

use crate::application::ports::ApiTransport;
use crate::application::services::locate;

/// Resolve the target service id shared by several commands: an explicit
/// `--service-id` wins, otherwise the `--host` locator is resolved.
pub(crate) fn target_service_id(
    api: &impl ApiTransport,
    service_id: Option<&str>,
    host: Option<&str>,
) -> Result<String> {
    if let Some(id) = service_id {
        return Ok(id.to_string());
    }
    match host {
        Some(locator) => locate::resolve_locator(api, locator),
        None => anyhow::bail!("either --service-id or --host is required"),
    }
}
