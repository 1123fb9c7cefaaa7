//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::domain::{ApiConfig, WaitTimeouts};
use crate::infra::{HttpTransport, SystemClock};
use crate::output::OutputContext;

/// Load balancer service-link and stack lifecycle client
#[derive(Parser)]
#[command(
    name = "linkctl",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Platform connection parameters, shared by all API commands.
#[derive(Args)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(long, global = true, env = "RANCHER_API_URL")]
    pub api_url: Option<String>,

    /// API access key
    #[arg(long, global = true, env = "RANCHER_API_KEY")]
    pub access_key: Option<String>,

    /// API secret key
    #[arg(long, global = true, env = "RANCHER_API_SECRET", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Project (environment) id
    #[arg(long, global = true, env = "RANCHER_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Load balancer service id
    #[arg(long, global = true, env = "RANCHER_LB_ID")]
    pub load_balancer_id: Option<String>,

    /// Stack upgrade timeout in seconds
    #[arg(long, global = true, env = "STACK_UPGRADE_TIMEOUT", default_value_t = 360)]
    pub upgrade_timeout: u64,

    /// Stack become-active timeout in seconds
    #[arg(long, global = true, env = "STACK_ACTIVE_TIMEOUT", default_value_t = 360)]
    pub active_timeout: u64,

    /// Stack become-healthy timeout in seconds
    #[arg(long, global = true, env = "STACK_HEALTHY_TIMEOUT", default_value_t = 360)]
    pub healthy_timeout: u64,
}

impl ConnectionArgs {
    /// Build the explicit configuration value threaded through every
    /// service call.
    ///
    /// # Errors
    ///
    /// Fails when the base URL or credentials are missing.
    pub fn api_config(&self) -> Result<ApiConfig> {
        let base_url = self
            .api_url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("missing API URL (--api-url or RANCHER_API_URL)"))?;
        let access_key = self
            .access_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("missing API key (--access-key or RANCHER_API_KEY)"))?;
        let secret_key = self.secret_key.clone().ok_or_else(|| {
            anyhow::anyhow!("missing API secret (--secret-key or RANCHER_API_SECRET)")
        })?;
        Ok(ApiConfig {
            base_url,
            access_key,
            secret_key,
            project_id: self.project_id.clone(),
            load_balancer_id: self.load_balancer_id.clone(),
            timeouts: WaitTimeouts {
                upgrade: self.upgrade_timeout,
                active: self.active_timeout,
                healthy: self.healthy_timeout,
            },
        })
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a load balancer routing rule for a service
    AddLink(commands::add_link::AddLinkArgs),

    /// Remove a load balancer routing rule (all duplicates at once)
    RemoveLink(commands::remove_link::RemoveLinkArgs),

    /// Create a stack, upgrading it instead when it already exists
    CreateStack(commands::create_stack::CreateStackArgs),

    /// Remove a stack by name
    RemoveStack(commands::remove_stack::RemoveStackArgs),

    /// Upgrade a service and wait until it is healthy
    UpgradeService(commands::upgrade_service::UpgradeServiceArgs),

    /// Merge a JSON patch into the load balancer configuration
    UpdateLb(commands::update_lb::UpdateLbArgs),

    /// Find a free external port in a range
    GetPort(commands::get_port::GetPortArgs),

    /// Show the external port bound to a service
    GetServicePort(commands::service_port::ServicePortArgs),

    /// Resolve a service locator to its id
    GetSvcId(commands::resolve::SvcIdArgs),

    /// Show the container id of a service's first instance
    GetContainerId(commands::resolve::InstanceLookupArgs),

    /// Show the public IP of the host running a service
    GetHostIp(commands::resolve::InstanceLookupArgs),

    /// Manage registrar DNS records
    #[command(subcommand)]
    Dns(commands::dns::DnsCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails; informational no-ops are
    /// successes.
    pub fn run(self) -> Result<()> {
        let ctx = OutputContext::new(self.no_color, self.quiet);

        if let Command::Dns(command) = &self.command {
            return commands::dns::run(&ctx, command);
        }

        let config = self.connection.api_config()?;
        let api = HttpTransport::new(&config);
        let clock = SystemClock;

        match &self.command {
            Command::AddLink(args) => commands::add_link::run(&ctx, &api, &config, args),
            Command::RemoveLink(args) => commands::remove_link::run(&ctx, &api, &config, args),
            Command::CreateStack(args) => {
                commands::create_stack::run(&ctx, &api, &clock, &config, args)
            }
            Command::RemoveStack(args) => commands::remove_stack::run(&ctx, &api, args),
            Command::UpgradeService(args) => {
                commands::upgrade_service::run(&ctx, &api, &clock, &config, args)
            }
            Command::UpdateLb(args) => commands::update_lb::run(&ctx, &api, &config, args),
            Command::GetPort(args) => commands::get_port::run(&ctx, &api, &config, args),
            Command::GetServicePort(args) => {
                commands::service_port::run(&ctx, &api, &config, args)
            }
            Command::GetSvcId(args) => commands::resolve::svc_id(&ctx, &api, args),
            Command::GetContainerId(args) => commands::resolve::container_id(&ctx, &api, args),
            Command::GetHostIp(args) => commands::resolve::host_ip(&ctx, &api, args),
            Command::Dns(_) => unreachable!("handled above"),
        }
    }
}
