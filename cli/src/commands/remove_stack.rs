//! `linkctl remove-stack` — delete a stack by name.

use anyhow::Result;
use clap::Args;

use crate::application::ports::ApiTransport;
use crate::application::services::stacks;
use crate::output::OutputContext;

#[derive(Args)]
pub struct RemoveStackArgs {
    /// Stack name
    #[arg(long)]
    pub name: String,
}

/// Run `linkctl remove-stack`.
///
/// # Errors
///
/// Returns an error when the stack is unknown or the platform rejects the
/// remove action.
pub fn run(ctx: &OutputContext, api: &impl ApiTransport, args: &RemoveStackArgs) -> Result<()> {
    stacks::remove_stack(api, &args.name)?;
    ctx.success(&format!("Stack {} removed", args.name));
    Ok(())
}
