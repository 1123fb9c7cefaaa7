//! Identifier lookups: `get-svc-id`, `get-container-id`, `get-host-ip`.

use anyhow::Result;
use clap::Args;

use crate::application::ports::ApiTransport;
use crate::application::services::{locate, services};
use crate::commands::target_service_id;
use crate::output::OutputContext;

#[derive(Args)]
pub struct SvcIdArgs {
    /// Service locator, `<service>.<stack>.<domain>`
    #[arg(long)]
    pub host: String,
}

/// Run `linkctl get-svc-id`; prints the service id on stdout.
///
/// # Errors
///
/// Returns an error on a malformed locator or an unknown stack/service.
pub fn svc_id(ctx: &OutputContext, api: &impl ApiTransport, args: &SvcIdArgs) -> Result<()> {
    ctx.value(locate::resolve_locator(api, &args.host)?);
    Ok(())
}

#[derive(Args)]
pub struct InstanceLookupArgs {
    /// Target service id; resolved from --host when not set
    #[arg(long)]
    pub service_id: Option<String>,

    /// Service locator, `<service>.<stack>.<domain>`
    #[arg(long)]
    pub host: Option<String>,
}

/// Run `linkctl get-container-id`; prints the container id of the
/// service's first instance.
///
/// # Errors
///
/// Returns an error when the service has no instances.
pub fn container_id(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    args: &InstanceLookupArgs,
) -> Result<()> {
    let service_id = target_service_id(api, args.service_id.as_deref(), args.host.as_deref())?;
    ctx.value(services::first_container_id(api, &service_id)?);
    Ok(())
}

/// Run `linkctl get-host-ip`; prints the public IP of the host running the
/// service's first instance.
///
/// # Errors
///
/// Returns an error when the service has no instances or the host has no
/// public endpoints.
pub fn host_ip(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    args: &InstanceLookupArgs,
) -> Result<()> {
    let service_id = target_service_id(api, args.service_id.as_deref(), args.host.as_deref())?;
    ctx.value(services::first_instance_host_ip(api, &service_id)?);
    Ok(())
}
