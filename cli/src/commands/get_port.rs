//! `linkctl get-port` — find a free external port in a range.
//!
//! By default the scan runs against the load balancer's own tcp port
//! rules; with `--host-id` it runs against that host's public endpoints
//! instead. A port already reserved by the target service is returned
//! as-is, so repeated deployments keep their port.

use anyhow::Result;
use clap::Args;

use crate::application::ports::ApiTransport;
use crate::application::services::{links, locate, ports_alloc, services};
use crate::domain::ApiConfig;
use crate::output::OutputContext;

#[derive(Args)]
pub struct GetPortArgs {
    /// Start of the desired port range (inclusive)
    #[arg(long)]
    pub range_start: u16,

    /// End of the desired port range (inclusive)
    #[arg(long)]
    pub range_end: u16,

    /// Scan this host's public endpoints instead of the LB port rules
    #[arg(long)]
    pub host_id: Option<String>,

    /// Service whose existing reservation should be reused, as a locator
    #[arg(long)]
    pub host: Option<String>,

    /// Service whose existing reservation should be reused, by id
    #[arg(long)]
    pub service_id: Option<String>,
}

/// Run `linkctl get-port`; prints the port on stdout.
///
/// # Errors
///
/// Returns an error on API failures or when the range is exhausted.
pub fn run(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    config: &ApiConfig,
    args: &GetPortArgs,
) -> Result<()> {
    let preferred_owner = match (&args.service_id, &args.host) {
        (Some(id), _) => Some(id.clone()),
        (None, Some(locator)) => locate::try_resolve_locator(api, locator)?,
        (None, None) => None,
    };

    let port = if let Some(host_id) = &args.host_id {
        let endpoints = services::host_endpoints(api, host_id)?;
        ports_alloc::find_free_port(
            args.range_start,
            args.range_end,
            &ports_alloc::host_reservations(&endpoints),
            preferred_owner.as_deref(),
        )?
    } else {
        links::available_lb_port(
            api,
            config,
            args.range_start,
            args.range_end,
            preferred_owner.as_deref(),
        )?
    };
    ctx.value(port);
    Ok(())
}
