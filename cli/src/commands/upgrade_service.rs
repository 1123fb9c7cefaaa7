//! `linkctl upgrade-service` — two-phase service upgrade with waits.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::application::ports::{ApiTransport, Clock};
use crate::application::services::services;
use crate::domain::ApiConfig;
use crate::output::{OutputContext, TerminalReporter};

#[derive(Args)]
pub struct UpgradeServiceArgs {
    /// Service locator, `<service>.<stack>.<domain>`
    #[arg(long)]
    pub host: String,

    /// JSON object merged over the service definition for the upgrade
    #[arg(long)]
    pub data: Option<String>,
}

/// Run `linkctl upgrade-service`.
///
/// # Errors
///
/// Returns an error on an unknown locator, malformed `--data`, API
/// failures, or a wait timeout.
pub fn run(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    clock: &impl Clock,
    config: &ApiConfig,
    args: &UpgradeServiceArgs,
) -> Result<()> {
    let overrides: Option<Value> = args
        .data
        .as_deref()
        .map(|raw| serde_json::from_str(raw).context("--data is not valid JSON"))
        .transpose()?;
    services::upgrade_service(
        api,
        clock,
        &TerminalReporter::new(ctx),
        config,
        &args.host,
        overrides.as_ref(),
    )
}
