//! `linkctl add-link` — bind a routing rule to the load balancer.

use anyhow::Result;
use clap::Args;

use crate::application::ports::ApiTransport;
use crate::application::services::links::{self, AddOutcome};
use crate::commands::target_service_id;
use crate::domain::ApiConfig;
use crate::output::OutputContext;

#[derive(Args)]
pub struct AddLinkArgs {
    /// Target hostname; also used to resolve the service id when
    /// --service-id is absent
    #[arg(long)]
    pub host: String,

    /// External (public) port
    #[arg(long)]
    pub external_port: u16,

    /// Internal (service) port
    #[arg(long)]
    pub internal_port: u16,

    /// Target service id; resolved from --host when not set
    #[arg(long)]
    pub service_id: Option<String>,
}

/// Run `linkctl add-link`.
///
/// # Errors
///
/// Returns an error if the reconciliation fails; an already-bound route is
/// an informational no-op, not an error.
pub fn run(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    config: &ApiConfig,
    args: &AddLinkArgs,
) -> Result<()> {
    let service_id = target_service_id(api, args.service_id.as_deref(), Some(&args.host))?;
    match links::add_target(
        api,
        config,
        &service_id,
        &args.host,
        args.external_port,
        args.internal_port,
    )? {
        AddOutcome::Added(mapping) => {
            ctx.success(&format!("Added target {mapping} for service {service_id}"));
        }
        AddOutcome::AlreadyExists { service_id } => {
            ctx.info(&format!("This target already exists: {service_id}"));
        }
    }
    Ok(())
}
