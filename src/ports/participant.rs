//! Participant port - anything that can pick a move for the side it plays
//!
//! The evaluation pipeline seats a participant in the human role of a
//! [`GameSession`](crate::session::GameSession) and asks it for moves, so the
//! trained policy can be measured against baselines without a user interface.

use crate::{Result, tictactoe::BoardState, types::Position};

/// A source of moves for one side of a game.
///
/// # Examples
///
/// ```
/// use tictactoe_policy::{
///     Result,
///     ports::Participant,
///     tictactoe::BoardState,
///     types::Position,
/// };
///
/// /// Always plays the first empty cell
/// struct FirstEmpty;
///
/// impl Participant for FirstEmpty {
///     fn select_move(&mut self, state: &BoardState) -> Result<Position> {
///         Ok(state.empty_positions()[0])
///     }
///
///     fn name(&self) -> &str {
///         "first-empty"
///     }
/// }
///
/// let mut player = FirstEmpty;
/// assert_eq!(player.select_move(&BoardState::new())?.index(), 0);
/// # Ok::<(), tictactoe_policy::Error>(())
/// ```
pub trait Participant {
    /// Select a move for the player to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if no move can be produced (e.g. the board is full).
    fn select_move(&mut self, state: &BoardState) -> Result<Position>;

    /// Name used in reports and logs.
    fn name(&self) -> &str;

    /// Seed the participant's random number generator, if it has one.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
