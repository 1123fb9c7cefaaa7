//! `linkctl remove-link` — unbind a routing rule from the load balancer.

use anyhow::Result;
use clap::Args;

use crate::application::ports::ApiTransport;
use crate::application::services::links::{self, RemoveOutcome};
use crate::commands::target_service_id;
use crate::domain::ApiConfig;
use crate::output::OutputContext;

#[derive(Args)]
pub struct RemoveLinkArgs {
    /// Target hostname; also used to resolve the service id when
    /// --service-id is absent
    #[arg(long)]
    pub host: String,

    /// External (public) port
    #[arg(long)]
    pub external_port: u16,

    /// Target service id; resolved from --host when not set
    #[arg(long)]
    pub service_id: Option<String>,
}

/// Run `linkctl remove-link`.
///
/// # Errors
///
/// Returns an error if the reconciliation fails; a route that was never
/// bound is an informational no-op, not an error.
pub fn run(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    config: &ApiConfig,
    args: &RemoveLinkArgs,
) -> Result<()> {
    let service_id = target_service_id(api, args.service_id.as_deref(), Some(&args.host))?;
    match links::remove_target(api, config, &service_id, &args.host, args.external_port)? {
        RemoveOutcome::Removed { mappings } => {
            ctx.success(&format!(
                "Removed {mappings} mapping(s) for service {service_id}"
            ));
        }
        RemoveOutcome::NotFound => ctx.info("No such target"),
    }
    Ok(())
}
