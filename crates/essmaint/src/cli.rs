// CLI definition

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "essmaint",
    about = "Unattended maintenance reconciler for an ESS fleet",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file (defaults to the platform config dir).
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the inventory file path.
    #[arg(long, global = true)]
    pub inventory: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the reconciliation daemon until terminated.
    Run,
    /// Run a single reconciliation cycle and exit.
    Once,
}
