//! `linkctl update-lb` — merge a JSON patch into the LB configuration.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::application::ports::ApiTransport;
use crate::application::services::services;
use crate::domain::ApiConfig;
use crate::output::OutputContext;

#[derive(Args)]
pub struct UpdateLbArgs {
    /// JSON object deep-merged into the current LB configuration
    #[arg(long)]
    pub data: String,
}

/// Run `linkctl update-lb`.
///
/// # Errors
///
/// Returns an error on malformed `--data`, a merge conflict, or API
/// failures.
pub fn run(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    config: &ApiConfig,
    args: &UpdateLbArgs,
) -> Result<()> {
    let patch: Value = serde_json::from_str(&args.data).context("--data is not valid JSON")?;
    let lb_id = config.load_balancer_id()?.to_string();
    services::update_load_balancer(api, config, &lb_id, &patch)?;
    ctx.success(&format!("Load balancer {lb_id} updated"));
    Ok(())
}
