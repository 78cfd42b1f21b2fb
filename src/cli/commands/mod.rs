//! Subcommands of the `tictactoe-policy` binary

pub mod analyze;
pub mod evaluate;
pub mod train;

use anyhow::Result;
use clap::ValueEnum;

use crate::{
    cli::{config::CommonConfig, output::create_spinner},
    policy::{PolicyTable, SearchMode, Trainer, TrainerConfig, TrainingStats},
};

/// Search mode as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchArg {
    /// Stop scanning a state at its first immediately winning move
    ShortCircuit,
    /// Classify every empty cell of every state
    Exhaustive,
}

impl From<SearchArg> for SearchMode {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::ShortCircuit => SearchMode::ShortCircuit,
            SearchArg::Exhaustive => SearchMode::Exhaustive,
        }
    }
}

/// Train a table from the empty board behind a spinner
pub(crate) fn train_with_spinner(
    config: TrainerConfig,
    common: &CommonConfig,
) -> Result<(PolicyTable, TrainingStats)> {
    let spinner = create_spinner("Training policy table...", common.progress)?;
    let result = Trainer::with_config(config).train_with_stats();
    spinner.finish_and_clear();
    Ok(result)
}
