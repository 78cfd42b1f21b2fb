//! Train command - build the policy table and report on it

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::{SearchArg, train_with_spinner};
use crate::{
    cli::{
        config::CommonConfig,
        output::{format_number, format_rate, print_kv, print_section, print_subsection},
    },
    policy::TrainerConfig,
};

#[derive(Parser, Debug)]
#[command(about = "Build the policy table by backward induction")]
pub struct TrainArgs {
    /// How immediately winning moves end the scan of a state
    #[arg(long, value_enum, default_value_t = SearchArg::Exhaustive)]
    pub search: SearchArg,

    /// Reuse classifications of states that already have an entry
    #[arg(long, default_value_t = false)]
    pub memoize: bool,

    /// Do not store move-sets classified as losses
    #[arg(long, default_value_t = false)]
    pub skip_losses: bool,

    /// Write the finished table to this JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl TrainArgs {
    fn trainer_config(&self) -> TrainerConfig {
        TrainerConfig::new()
            .with_search_mode(self.search.into())
            .with_memoization(self.memoize)
            .with_loss_recording(!self.skip_losses)
    }
}

pub fn execute(args: TrainArgs, common: &CommonConfig) -> Result<()> {
    let config = args.trainer_config();
    print_section("Training");
    print_kv("Search mode", &format!("{:?}", config.search_mode));
    print_kv("Memoization", if config.memoize { "on" } else { "off" });
    print_kv("Loss move-sets", if config.record_losses { "kept" } else { "skipped" });

    let (table, stats) = train_with_spinner(config, common)?;

    print_subsection("Search");
    print_kv("Nodes visited", &format_number(stats.nodes));
    print_kv("Games enumerated", &format_number(stats.games()));
    print_kv("Winning leaves", &format_number(stats.winning_leaves));
    print_kv("Full-board leaves", &format_number(stats.full_board_leaves));
    if config.memoize {
        print_kv("Memo hits", &format_number(stats.memo_hits));
    }
    print_kv("Elapsed", &format!("{:.2?}", stats.elapsed));

    let summary = table.summary();
    print_subsection("Table");
    print_kv("Entries", &format_number(summary.entries as u64));
    print_kv(
        "Win states",
        &format!("{} ({})", summary.wins, format_rate(summary.wins, summary.entries)),
    );
    print_kv(
        "Draw states",
        &format!("{} ({})", summary.draws, format_rate(summary.draws, summary.entries)),
    );
    print_kv(
        "Loss states",
        &format!("{} ({})", summary.losses, format_rate(summary.losses, summary.entries)),
    );
    print_kv("Empty board", &stats.root.to_string());

    if let Some(path) = &args.export {
        table
            .export_json(path)
            .with_context(|| format!("exporting policy table to {}", path.display()))?;
        println!("\nTable exported to: {}", path.display());
    }

    Ok(())
}
