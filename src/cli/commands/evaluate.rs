//! Evaluate command - play the policy against a baseline participant

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use super::train_with_spinner;
use crate::{
    cli::{
        config::CommonConfig,
        output::{create_progress, format_rate, print_kv, print_section, print_subsection},
    },
    pipeline::{
        DefensiveParticipant, EvaluationConfig, Participant, PolicyParticipant,
        RandomParticipant, SideSchedule, evaluate,
    },
    policy::TrainerConfig,
    session::SessionStatus,
};

/// Baseline the policy plays against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentArg {
    /// Uniformly random legal moves
    Random,
    /// Wins or blocks when it can, otherwise random
    Defensive,
    /// A second copy of the policy
    Policy,
}

/// Side the baseline takes in the human seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    X,
    O,
    Alternate,
}

impl From<SideArg> for SideSchedule {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::X => SideSchedule::X,
            SideArg::O => SideSchedule::O,
            SideArg::Alternate => SideSchedule::Alternate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play the trained policy against a baseline")]
pub struct EvaluateArgs {
    /// Number of sessions to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Baseline participant
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentArg::Random)]
    pub opponent: OpponentArg,

    /// Side the baseline plays
    #[arg(long, value_enum, default_value_t = SideArg::Alternate)]
    pub human_side: SideArg,
}

pub fn execute(args: EvaluateArgs, common: &CommonConfig) -> Result<()> {
    let (table, _) = train_with_spinner(TrainerConfig::new().with_memoization(true), common)?;
    let policy = Arc::new(table);

    let mut opponent: Box<dyn Participant> = match args.opponent {
        OpponentArg::Random => Box::new(RandomParticipant::new("Random".to_string())),
        OpponentArg::Defensive => Box::new(DefensiveParticipant::new("Defensive".to_string())),
        OpponentArg::Policy => Box::new(PolicyParticipant::new(
            "Policy".to_string(),
            Arc::clone(&policy),
        )),
    };

    let config = EvaluationConfig {
        games: args.games,
        seed: common.seed,
        sides: args.human_side.into(),
    };

    print_section("Evaluation");
    print_kv("Opponent", opponent.name());
    print_kv("Opponent side", &format!("{:?}", config.sides));
    print_kv("Games", &config.games.to_string());
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let pb = create_progress(config.games as u64, common.progress)?;
    let mut losses = 0usize;
    let summary = evaluate(policy, opponent.as_mut(), &config, |_, status| {
        if status == SessionStatus::Won {
            losses += 1;
        }
        pb.set_message(format!("policy losses: {losses}"));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    print_subsection("Results (policy perspective)");
    print_kv("Games", &summary.games.to_string());
    print_kv(
        "Wins",
        &format!("{} ({})", summary.policy_wins, format_rate(summary.policy_wins, summary.games)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", summary.draws, format_rate(summary.draws, summary.games)),
    );
    print_kv(
        "Losses",
        &format!("{} ({})", summary.policy_losses, format_rate(summary.policy_losses, summary.games)),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_opponent_and_side() {
        let args = EvaluateArgs::parse_from([
            "evaluate",
            "--games",
            "5",
            "--opponent",
            "defensive",
            "--human-side",
            "o",
        ]);
        assert_eq!(args.games, 5);
        assert_eq!(args.opponent, OpponentArg::Defensive);
        assert_eq!(SideSchedule::from(args.human_side), SideSchedule::O);
    }
}
