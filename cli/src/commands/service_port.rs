//! `linkctl get-service-port` — external port currently bound to a service.

use anyhow::Result;
use clap::Args;

use crate::application::ports::ApiTransport;
use crate::application::services::links;
use crate::commands::target_service_id;
use crate::domain::ApiConfig;
use crate::output::OutputContext;

#[derive(Args)]
pub struct ServicePortArgs {
    /// Target service id; resolved from --host when not set
    #[arg(long)]
    pub service_id: Option<String>,

    /// Service locator, `<service>.<stack>.<domain>`
    #[arg(long)]
    pub host: Option<String>,
}

/// Run `linkctl get-service-port`; prints the port on stdout, or `-1` when
/// the service has no binding (kept for script compatibility).
///
/// # Errors
///
/// Returns an error on API failures or an unresolvable service.
pub fn run(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    config: &ApiConfig,
    args: &ServicePortArgs,
) -> Result<()> {
    let service_id = target_service_id(api, args.service_id.as_deref(), args.host.as_deref())?;
    match links::service_port(api, config, &service_id)? {
        Some(port) => ctx.value(port),
        None => ctx.value(-1),
    }
    Ok(())
}
