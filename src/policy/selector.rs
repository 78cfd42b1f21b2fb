//! Move selection from a trained policy table

use rand::{Rng, SeedableRng, prelude::IndexedRandom, random, rngs::StdRng};
use tracing::trace;

use super::{outcome::OutcomeClass, table::PolicyTable};
use crate::{Result, error::Error, tictactoe::BoardState, types::Position};

/// Pick a move for the player to move in `state`.
///
/// Winning moves are preferred, then drawing moves; among the moves of the
/// chosen class the pick is uniform. Moves classified as losses are never
/// played.
///
/// # Errors
///
/// - [`Error::UntrainedState`] if `state` has no entry
/// - [`Error::NoPlayableMove`] if every recorded move loses
pub fn choose_move<R>(state: &BoardState, table: &PolicyTable, rng: &mut R) -> Result<Position>
where
    R: Rng + ?Sized,
{
    choose_classified_move(state, table, rng).map(|(position, _)| position)
}

/// Like [`choose_move`], also returning the class of the chosen move.
///
/// # Errors
///
/// Same as [`choose_move`].
pub fn choose_classified_move<R>(
    state: &BoardState,
    table: &PolicyTable,
    rng: &mut R,
) -> Result<(Position, OutcomeClass)>
where
    R: Rng + ?Sized,
{
    let entry = table.lookup(state)?;
    let no_move = || Error::NoPlayableMove {
        key: state.key().into_string(),
    };

    let (class, moves) = entry.playable_moves().ok_or_else(no_move)?;
    let candidates: Vec<Position> = moves.iter().copied().collect();
    let position = *candidates.choose(rng).ok_or_else(no_move)?;

    trace!(state = %state.key(), %position, %class, candidates = candidates.len(), "Chose move");
    Ok((position, class))
}

/// Seedable move selector owned by a game session.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    rng: StdRng,
}

impl MoveSelector {
    /// Create a selector seeded from the thread RNG
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a selector with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// See [`choose_move`].
    ///
    /// # Errors
    ///
    /// Same as [`choose_move`].
    pub fn choose_move(&mut self, state: &BoardState, table: &PolicyTable) -> Result<Position> {
        choose_move(state, table, &mut self.rng)
    }

    /// See [`choose_classified_move`].
    ///
    /// # Errors
    ///
    /// Same as [`choose_move`].
    pub fn choose_classified_move(
        &mut self,
        state: &BoardState,
        table: &PolicyTable,
    ) -> Result<(Position, OutcomeClass)> {
        choose_classified_move(state, table, &mut self.rng)
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::policy::{SearchMode, Trainer, TrainerConfig};

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn picks_only_the_drawing_reply_to_a_corner_opening() {
        let state = BoardState::from_string("X........").unwrap();
        let (table, _) = Trainer::new().train_from(state);

        let mut selector = MoveSelector::with_seed(7);
        for _ in 0..20 {
            let (position, class) = selector.choose_classified_move(&state, &table).unwrap();
            assert_eq!(position, pos(1, 1));
            assert_eq!(class, OutcomeClass::Draw);
        }
    }

    #[test]
    fn spreads_choices_over_equivalent_moves() {
        let state = BoardState::new();
        let config = TrainerConfig::new().with_memoization(true);
        let (table, _) = Trainer::with_config(config).train_from(state);

        let mut selector = MoveSelector::with_seed(42);
        let picks: BTreeSet<Position> = (0..200)
            .map(|_| selector.choose_move(&state, &table).unwrap())
            .collect();
        assert!(picks.len() > 1, "expected several opening moves, got {picks:?}");
    }

    #[test]
    fn losing_state_has_no_playable_move() {
        // O to move against X's forced win
        let state = BoardState::from_string("XO.X.....").unwrap();
        let config = TrainerConfig::new().with_search_mode(SearchMode::ShortCircuit);
        let (table, stats) = Trainer::with_config(config).train_from(state);
        assert_eq!(stats.root, OutcomeClass::Loss);

        let err = MoveSelector::with_seed(1)
            .choose_move(&state, &table)
            .unwrap_err();
        assert!(matches!(err, Error::NoPlayableMove { .. }));
    }

    #[test]
    fn same_seed_same_choices() {
        let state = BoardState::new();
        let config = TrainerConfig::new().with_memoization(true);
        let table = Trainer::with_config(config).train();

        let mut a = MoveSelector::with_seed(9);
        let mut b = MoveSelector::with_seed(9);
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&state, &table).unwrap(),
                b.choose_move(&state, &table).unwrap()
            );
        }
    }
}
