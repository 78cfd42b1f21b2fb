//! Perfect-play policy table for Tic-Tac-Toe
//!
//! This crate provides:
//! - A mutable board with guarded place/undo for in-place search
//! - An exhaustive backward-induction trainer that classifies every reachable
//!   state as a win, draw, or loss for the player to move
//! - A policy table and seeded move selector that never plays a losing move
//!   when a better one exists
//! - A game session state machine pairing a human participant with the policy
//! - An evaluation pipeline and CLI for exercising the policy

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod session;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use policy::{
    MoveSelector, OutcomeClass, PolicyEntry, PolicyTable, SearchMode, Trainer, TrainerConfig,
    choose_move, train,
};
pub use session::{GameSession, MoveReport, SessionStatus};
pub use tictactoe::{BoardState, Cell, Player};
pub use types::{BoardKey, Position};
