//! tictactoe-policy - build and exercise a perfect-play tic-tac-toe policy
//!
//! - `train` builds the policy table and reports search statistics
//! - `analyze` shows how a single board state is classified
//! - `evaluate` plays the policy against baseline participants

use anyhow::Result;
use clap::{Parser, Subcommand};
use tictactoe_policy::cli::{
    commands::{analyze, evaluate, train},
    config::CommonConfig,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe-policy")]
#[command(version, about = "Perfect-play policy table for tic-tac-toe", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Hide spinners and progress bars
    #[arg(long, global = true)]
    no_progress: bool,

    /// Random seed for reproducible move selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the policy table
    Train(train::TrainArgs),

    /// Show how a board state is classified
    Analyze(analyze::AnalyzeArgs),

    /// Play the policy against a baseline
    Evaluate(evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let common = CommonConfig {
        seed: cli.seed,
        progress: !cli.no_progress,
        verbose: cli.verbose,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(common.log_directive())),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!(?common, "Starting");

    match cli.command {
        Commands::Train(args) => train::execute(args, &common),
        Commands::Analyze(args) => analyze::execute(args, &common),
        Commands::Evaluate(args) => evaluate::execute(args, &common),
    }
}
