mod driver;
mod estimate;
mod logging;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None, propagate_version = true)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long = "log-level", global = true, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: CliCommands,
}

#[derive(Debug, Subcommand)]
enum CliCommands {
    /// Estimate win and push rates for a hand that stands against a dealer upcard
    Estimate(estimate::EstimateArgs),
    /// Generate statistics
    Stats {
        #[command(subcommand)]
        command: stats::CliCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);

    match &cli.command {
        CliCommands::Estimate(args) => estimate::run(args),
        CliCommands::Stats { command } => stats::run(command),
    }
}
