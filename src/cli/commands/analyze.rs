//! Analyze command - show the classified moves of one board state

use anyhow::Result;
use clap::Parser;

use super::SearchArg;
use crate::{
    cli::{
        config::CommonConfig,
        output::{create_spinner, print_kv, print_section, print_subsection},
    },
    policy::{OutcomeClass, Trainer, TrainerConfig},
    tictactoe::BoardState,
};

#[derive(Parser, Debug)]
#[command(about = "Show how the policy classifies a board state")]
pub struct AnalyzeArgs {
    /// Board as nine cells in row-major order, e.g. "XX.OO...."
    #[arg(long)]
    pub state: String,

    /// How immediately winning moves end the scan of a state
    #[arg(long, value_enum, default_value_t = SearchArg::Exhaustive)]
    pub search: SearchArg,
}

pub fn execute(args: AnalyzeArgs, common: &CommonConfig) -> Result<()> {
    let state = BoardState::from_string(&args.state)?;

    print_section("Board");
    println!("{state}");
    print_kv("Key", state.key().as_str());

    if let Some(winner) = state.winner() {
        print_kv("Result", &format!("{winner} has won"));
        return Ok(());
    }
    if state.is_full() {
        print_kv("Result", "draw, board full");
        return Ok(());
    }
    print_kv("To move", &state.to_move().to_string());

    let config = TrainerConfig::new()
        .with_search_mode(args.search.into())
        .with_memoization(true);
    let spinner = create_spinner("Searching continuations...", common.progress)?;
    let (table, stats) = Trainer::with_config(config).train_from(state);
    spinner.finish_and_clear();

    let entry = table.lookup(&state)?;
    print_kv("Classification", &entry.classification().to_string());
    print_kv("States below", &stats.entries.to_string());

    print_subsection("Moves");
    for class in OutcomeClass::ALL {
        let moves = entry.moves(class);
        if moves.is_empty() {
            continue;
        }
        let listed: Vec<String> = moves.iter().map(ToString::to_string).collect();
        print_kv(class.as_str(), &listed.join(" "));
    }

    if entry.playable_moves().is_none() {
        println!("\nEvery move loses against best play.");
    }

    Ok(())
}
