//! Backward-induction trainer
//!
//! Walks every alternating-play continuation from a starting board, mutating a
//! single [`BoardState`] in place, and classifies each state as a win, draw, or
//! loss for the player about to move. Every classified move is recorded in a
//! [`PolicyTable`] keyed by the state it was played from.

use std::{
    collections::hash_map::Entry,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, trace};

use super::{
    outcome::{OutcomeClass, SeenClasses},
    table::{PolicyEntry, PolicyTable},
};
use crate::{
    tictactoe::BoardState,
    types::{BoardKey, Position},
};

/// How the trainer treats a move that wins on the spot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchMode {
    /// Record the winning move and stop scanning the state's remaining cells.
    ///
    /// Later cells of that state get no entry, and states reachable only
    /// through them are never keyed.
    ShortCircuit,
    /// Record the winning move and keep scanning, so every entry classifies
    /// every empty cell of its state.
    #[default]
    Exhaustive,
}

/// Configuration for a training run.
///
/// # Examples
///
/// ```
/// use tictactoe_policy::policy::{SearchMode, Trainer, TrainerConfig};
///
/// let config = TrainerConfig::new()
///     .with_search_mode(SearchMode::ShortCircuit)
///     .with_memoization(true);
/// let table = Trainer::with_config(config).train();
/// assert!(!table.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Treatment of immediately winning moves
    pub search_mode: SearchMode,
    /// Reuse the classification of a state that already has an entry instead
    /// of searching its subtree again
    pub memoize: bool,
    /// Store move-sets classified as losses
    pub record_losses: bool,
}

impl TrainerConfig {
    /// Defaults: exhaustive search, no memoization, losses recorded.
    pub fn new() -> Self {
        Self {
            search_mode: SearchMode::default(),
            memoize: false,
            record_losses: true,
        }
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_loss_recording(mut self, record_losses: bool) -> Self {
        self.record_losses = record_losses;
        self
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters collected during one training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainingStats {
    /// Calls to the recursive classifier, memo hits included
    pub nodes: u64,
    /// Moves that completed a line
    pub winning_leaves: u64,
    /// Calls that found the board full
    pub full_board_leaves: u64,
    /// Calls answered from an existing entry
    pub memo_hits: u64,
    /// Entries in the finished table
    pub entries: usize,
    /// Classification of the starting state
    pub root: OutcomeClass,
    pub elapsed: Duration,
}

impl TrainingStats {
    /// Distinct move sequences that reached the end of a game.
    pub fn games(&self) -> u64 {
        self.winning_leaves + self.full_board_leaves
    }
}

#[derive(Debug, Default)]
struct Counters {
    nodes: u64,
    winning_leaves: u64,
    full_board_leaves: u64,
    memo_hits: u64,
}

/// Builds a [`PolicyTable`] by exhaustive backward induction.
#[derive(Debug)]
pub struct Trainer {
    config: TrainerConfig,
    table: PolicyTable,
    counters: Counters,
}

impl Trainer {
    pub fn new() -> Self {
        Self::with_config(TrainerConfig::default())
    }

    pub fn with_config(config: TrainerConfig) -> Self {
        Self {
            config,
            table: PolicyTable::new(),
            counters: Counters::default(),
        }
    }

    /// Train from the empty board and return the finished table.
    pub fn train(self) -> PolicyTable {
        self.train_with_stats().0
    }

    /// Train from the empty board, returning the table and run counters.
    pub fn train_with_stats(self) -> (PolicyTable, TrainingStats) {
        self.train_from(BoardState::new())
    }

    /// Train from an arbitrary starting state.
    pub fn train_from(mut self, mut state: BoardState) -> (PolicyTable, TrainingStats) {
        let span = info_span!(
            "train",
            mode = ?self.config.search_mode,
            memoize = self.config.memoize
        );
        let _guard = span.enter();

        info!(start = %state.key(), "Training policy table");
        let started = Instant::now();
        let root = self.classify(&mut state);
        let elapsed = started.elapsed();

        let stats = TrainingStats {
            nodes: self.counters.nodes,
            winning_leaves: self.counters.winning_leaves,
            full_board_leaves: self.counters.full_board_leaves,
            memo_hits: self.counters.memo_hits,
            entries: self.table.len(),
            root,
            elapsed,
        };
        info!(
            root = %stats.root,
            entries = stats.entries,
            nodes = stats.nodes,
            games = stats.games(),
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "Training complete"
        );

        (self.table, stats)
    }

    /// Classify `state` for the player to move and record its entry.
    ///
    /// The board is mutated during the search and restored before returning.
    /// Terminal states are never recorded. A board that already has a winner
    /// classifies from the mover's side of that result; a full board classifies
    /// as a draw, since the move that filled it was already checked for a win
    /// by the caller.
    pub fn classify(&mut self, state: &mut BoardState) -> OutcomeClass {
        self.counters.nodes += 1;

        // Only a caller-supplied start can already be won; the search itself
        // stops at the winning move.
        if let Some(winner) = state.winner() {
            return if winner == state.to_move() {
                OutcomeClass::Win
            } else {
                OutcomeClass::Loss
            };
        }

        if state.is_full() {
            self.counters.full_board_leaves += 1;
            return OutcomeClass::Draw;
        }

        let key = state.key();
        if self.config.memoize {
            if let Some(entry) = self.table.get(&key) {
                self.counters.memo_hits += 1;
                return entry.classification();
            }
        }

        let mut entry = PolicyEntry::default();
        let mut seen = SeenClasses::default();

        for position in Position::all() {
            let (class, immediate) = {
                let Ok(mut placed) = state.play(position) else {
                    continue;
                };
                if placed.is_winning() {
                    self.counters.winning_leaves += 1;
                    (OutcomeClass::Win, true)
                } else {
                    let opponent = self.classify(&mut placed);
                    (OutcomeClass::from_opponent(opponent), false)
                }
            };

            if class != OutcomeClass::Loss || self.config.record_losses {
                entry.record(position, class);
            }

            if immediate && self.config.search_mode == SearchMode::ShortCircuit {
                trace!(state = %key, %position, "Immediate win, skipping remaining cells");
                return self.finish(key, entry, OutcomeClass::Win);
            }
            seen.insert(class);
        }

        self.finish(key, entry, seen.classify())
    }

    fn finish(
        &mut self,
        key: BoardKey,
        mut entry: PolicyEntry,
        class: OutcomeClass,
    ) -> OutcomeClass {
        entry.set_classification(class);
        match self.table.entry(key) {
            Entry::Vacant(slot) => {
                debug!(state = %slot.key(), %class, "New policy entry");
                slot.insert(entry);
            }
            // A transposition re-derives the same entry
            Entry::Occupied(mut slot) => {
                slot.insert(entry);
            }
        }
        class
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the policy table from the empty board with default settings.
pub fn train() -> PolicyTable {
    Trainer::new().train()
}
