//! Common test utilities for the policy test suite.
//!
//! Training the full table takes a noticeable fraction of a second in debug
//! builds, so each test binary trains it once and shares it.

#![allow(dead_code)]

use std::{
    collections::HashSet,
    sync::{Arc, OnceLock},
};

use tictactoe_policy::{
    policy::{PolicyTable, Trainer, TrainingStats},
    tictactoe::BoardState,
    types::Position,
};

static TRAINED: OnceLock<(Arc<PolicyTable>, TrainingStats)> = OnceLock::new();

fn trained() -> &'static (Arc<PolicyTable>, TrainingStats) {
    TRAINED.get_or_init(|| {
        let (table, stats) = Trainer::new().train_with_stats();
        (Arc::new(table), stats)
    })
}

/// Table trained from the empty board with default settings
pub fn policy() -> Arc<PolicyTable> {
    Arc::clone(&trained().0)
}

/// Counters from the shared training run
pub fn stats() -> TrainingStats {
    trained().1
}

pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

pub fn board(s: &str) -> BoardState {
    BoardState::from_string(s).unwrap()
}

/// Every state reachable from the empty board by alternating play that is
/// neither won nor full.
pub fn reachable_open_states() -> HashSet<BoardState> {
    fn walk(state: &mut BoardState, seen: &mut HashSet<BoardState>) {
        if state.is_terminal() || !seen.insert(*state) {
            return;
        }
        for position in state.empty_positions() {
            let mut placed = state.play(position).unwrap();
            walk(&mut placed, seen);
        }
    }

    let mut seen = HashSet::new();
    walk(&mut BoardState::new(), &mut seen);
    seen
}
