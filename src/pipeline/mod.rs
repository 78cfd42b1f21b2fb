//! Evaluation pipeline
//!
//! Plays game sessions between the trained policy and baseline participants
//! and tallies the results.

pub mod evaluation;

pub use evaluation::{
    DefensiveParticipant, EvaluationConfig, EvaluationSummary, PolicyParticipant,
    RandomParticipant, SideSchedule, evaluate, play_session,
};

pub use crate::ports::Participant;
