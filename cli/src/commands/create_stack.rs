//! `linkctl create-stack` — create (or upgrade) a stack and wait for it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::{ApiTransport, Clock};
use crate::application::services::stacks::{self, StackSpec};
use crate::domain::ApiConfig;
use crate::output::{OutputContext, TerminalReporter};

#[derive(Args)]
pub struct CreateStackArgs {
    /// Stack name
    #[arg(long)]
    pub name: String,

    /// Deployment descriptor path
    #[arg(long)]
    pub docker_compose: PathBuf,

    /// Platform-specific descriptor path
    #[arg(long)]
    pub rancher_compose: Option<PathBuf>,

    /// Comma-separated stack tags
    #[arg(long)]
    pub tags: Option<String>,
}

/// Run `linkctl create-stack`.
///
/// # Errors
///
/// Returns an error on unreadable compose files, API failures, or when the
/// stack does not reach the active/healthy states in time.
pub fn run(
    ctx: &OutputContext,
    api: &impl ApiTransport,
    clock: &impl Clock,
    config: &ApiConfig,
    args: &CreateStackArgs,
) -> Result<()> {
    let docker_compose = read_compose(&args.docker_compose)?;
    let rancher_compose = args
        .rancher_compose
        .as_deref()
        .map(read_compose)
        .transpose()?
        .unwrap_or_default();
    let spec = StackSpec {
        name: &args.name,
        docker_compose: &docker_compose,
        rancher_compose: &rancher_compose,
        tags: args.tags.as_deref(),
    };
    stacks::create_stack(api, clock, &TerminalReporter::new(ctx), config, &spec)
}

pub(crate) fn read_compose(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Could not open compose file: {}", path.display()))
}
