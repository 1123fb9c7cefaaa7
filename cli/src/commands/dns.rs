//! `linkctl dns` — type-A record management at the registrar.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::infra::{DnsClient, DnsConfig, DnsOutcome};
use crate::output::OutputContext;

#[derive(Subcommand)]
pub enum DnsCommand {
    /// Add a type-A record
    AddRecord(AddRecordArgs),
    /// Remove a type-A record
    RemoveRecord(RemoveRecordArgs),
}

#[derive(Args)]
pub struct DnsConnectionArgs {
    /// Registrar API base URL
    #[arg(long, env = "DNS_API_URL")]
    pub dns_url: String,

    /// Registrar API token
    #[arg(long, env = "DNS_API_TOKEN", hide_env_values = true)]
    pub dns_token: String,
}

#[derive(Args)]
pub struct AddRecordArgs {
    #[command(flatten)]
    pub connection: DnsConnectionArgs,

    /// Fully qualified domain name
    #[arg(long)]
    pub fqdn: String,

    /// Pointer IP address
    #[arg(long)]
    pub ip: String,

    /// Record TTL in seconds
    #[arg(long, default_value_t = 360)]
    pub ttl: u32,
}

#[derive(Args)]
pub struct RemoveRecordArgs {
    #[command(flatten)]
    pub connection: DnsConnectionArgs,

    /// Fully qualified domain name
    #[arg(long)]
    pub fqdn: String,
}

/// Run `linkctl dns <add-record|remove-record>`.
///
/// # Errors
///
/// Returns an error on transport failures or registrar errors; a record
/// already in the requested state is an informational no-op.
pub fn run(ctx: &OutputContext, command: &DnsCommand) -> Result<()> {
    match command {
        DnsCommand::AddRecord(args) => {
            let client = client(&args.connection);
            match client.add_record(&args.fqdn, &args.ip, args.ttl)? {
                DnsOutcome::Changed => ctx.success(&format!("Record {} added", args.fqdn)),
                DnsOutcome::NoOp => ctx.info(&format!("Record {} already exists", args.fqdn)),
            }
        }
        DnsCommand::RemoveRecord(args) => {
            let client = client(&args.connection);
            match client.remove_record(&args.fqdn)? {
                DnsOutcome::Changed => ctx.success(&format!("Record {} removed", args.fqdn)),
                DnsOutcome::NoOp => ctx.info("No such record"),
            }
        }
    }
    Ok(())
}

fn client(connection: &DnsConnectionArgs) -> DnsClient {
    DnsClient::new(DnsConfig {
        base_url: connection.dns_url.clone(),
        token: connection.dns_token.clone(),
    })
}
