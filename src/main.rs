//! Unified hostgate CLI.
//!
//! - `hostgate list` - List the hosts a user may reach, with categories
//! - `hostgate classify` - Show the categories a rule file assigns to host names

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// hostgate unified CLI.
#[derive(Parser)]
#[command(
    name = "hostgate",
    version,
    about = "Per-user allowed hosts and host categories for SSH gateways",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the hosts a user may reach.
    #[command(name = "list", alias = "ls")]
    List(Box<hostgate_hosts::cli::ListArgs>),

    /// Classify host names against a category rule file.
    #[command(name = "classify")]
    Classify(hostgate_hosts::cli::ClassifyArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List(args) => hostgate_hosts::cli::run_list(*args).await,
        Commands::Classify(args) => hostgate_hosts::cli::run_classify(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
