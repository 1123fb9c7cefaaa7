//! linkctl - load balancer service-link and stack lifecycle client

use std::process::ExitCode;

use clap::Parser;

use linkctl_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = cli.run() {
        eprintln!("Error: {e}");
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}
