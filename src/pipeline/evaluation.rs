//! Evaluation of the trained policy against baseline participants

use std::sync::Arc;

use rand::{Rng, SeedableRng, random, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::{
    Result,
    error::Error,
    policy::{MoveSelector, PolicyTable},
    ports::Participant,
    session::{GameSession, Role, SessionStatus},
    tictactoe::{BoardState, LineAnalyzer, Player},
    types::Position,
};

/// Uniformly random baseline
pub struct RandomParticipant {
    name: String,
    rng: StdRng,
}

impl RandomParticipant {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Participant for RandomParticipant {
    fn select_move(&mut self, state: &BoardState) -> Result<Position> {
        let moves = state.empty_positions();
        if moves.is_empty() {
            return Err(Error::NoPlayableMove {
                key: state.key().into_string(),
            });
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Baseline that takes an immediate win, blocks an immediate loss, and
/// otherwise plays randomly
pub struct DefensiveParticipant {
    name: String,
    rng: StdRng,
}

impl DefensiveParticipant {
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Participant for DefensiveParticipant {
    fn select_move(&mut self, state: &BoardState) -> Result<Position> {
        let mover = state.to_move();
        let urgent = LineAnalyzer::winning_moves(state.cells(), mover)
            .into_iter()
            .next()
            .or_else(|| {
                LineAnalyzer::winning_moves(state.cells(), mover.opponent())
                    .into_iter()
                    .next()
            });
        if let Some(position) = urgent {
            return Ok(position);
        }

        let moves = state.empty_positions();
        if moves.is_empty() {
            return Err(Error::NoPlayableMove {
                key: state.key().into_string(),
            });
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// The trained policy seated as an ordinary participant
pub struct PolicyParticipant {
    name: String,
    policy: Arc<PolicyTable>,
    selector: MoveSelector,
}

impl PolicyParticipant {
    pub fn new(name: String, policy: Arc<PolicyTable>) -> Self {
        Self {
            name,
            policy,
            selector: MoveSelector::new(),
        }
    }
}

impl Participant for PolicyParticipant {
    fn select_move(&mut self, state: &BoardState) -> Result<Position> {
        self.selector.choose_move(state, &self.policy)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.selector.reseed(seed);
    }
}

/// Which side the baseline participant takes in each game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideSchedule {
    /// Baseline always plays X
    X,
    /// Baseline always plays O
    O,
    /// Baseline plays X in even-numbered games and O in odd-numbered ones
    #[default]
    Alternate,
}

impl SideSchedule {
    pub fn side_for(&self, game: usize) -> Player {
        match self {
            SideSchedule::X => Player::X,
            SideSchedule::O => Player::O,
            SideSchedule::Alternate if game.is_multiple_of(2) => Player::X,
            SideSchedule::Alternate => Player::O,
        }
    }
}

/// Evaluation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of sessions to play
    pub games: usize,
    /// Base seed; game `i` uses `seed + i` for both sides
    pub seed: Option<u64>,
    pub sides: SideSchedule,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
            sides: SideSchedule::default(),
        }
    }
}

/// Session results, counted from the policy's side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationSummary {
    pub games: usize,
    pub policy_wins: usize,
    pub draws: usize,
    pub policy_losses: usize,
}

impl EvaluationSummary {
    /// Count a finished session. The baseline holds the human seat, so a
    /// human loss is a policy win.
    pub fn record(&mut self, status: SessionStatus) {
        match status {
            SessionStatus::Won => self.policy_losses += 1,
            SessionStatus::Lost => self.policy_wins += 1,
            SessionStatus::Drawn => self.draws += 1,
            SessionStatus::NotStarted | SessionStatus::InProgress => return,
        }
        self.games += 1;
    }
}

/// Drive `session` to completion with `opponent` in the human seat.
///
/// # Errors
///
/// Propagates move errors from either side.
pub fn play_session(
    session: &mut GameSession,
    opponent: &mut dyn Participant,
) -> Result<SessionStatus> {
    session.start()?;
    while !session.status().is_over() {
        match session.whose_turn() {
            Role::Human => {
                let position = opponent.select_move(session.board())?;
                session.play_human(position)?;
            }
            Role::Automated => {
                session.play_automated()?;
            }
        }
    }
    Ok(session.status())
}

/// Play `config.games` sessions of the policy against `opponent`.
///
/// `on_game` is called after every session with its index and final status.
///
/// # Errors
///
/// Propagates move errors; a policy that reaches an untrained state aborts the
/// run.
pub fn evaluate<F>(
    policy: Arc<PolicyTable>,
    opponent: &mut dyn Participant,
    config: &EvaluationConfig,
    mut on_game: F,
) -> Result<EvaluationSummary>
where
    F: FnMut(usize, SessionStatus),
{
    let span = info_span!("evaluate", opponent = opponent.name(), games = config.games);
    let _guard = span.enter();

    let mut summary = EvaluationSummary::default();
    for game in 0..config.games {
        let selector = match config.seed {
            Some(seed) => {
                let game_seed = seed.wrapping_add(game as u64);
                opponent.set_rng_seed(game_seed.wrapping_mul(31).wrapping_add(1));
                MoveSelector::with_seed(game_seed)
            }
            None => MoveSelector::new(),
        };

        let side = config.sides.side_for(game);
        let mut session = GameSession::with_selector(Arc::clone(&policy), side, selector);
        let status = play_session(&mut session, opponent)?;
        debug!(game, opponent_side = %side, ?status, "Evaluation game finished");

        summary.record(status);
        on_game(game, status);
    }

    info!(
        policy_wins = summary.policy_wins,
        draws = summary.draws,
        policy_losses = summary.policy_losses,
        "Evaluation complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_schedule_alternates() {
        let schedule = SideSchedule::Alternate;
        assert_eq!(schedule.side_for(0), Player::X);
        assert_eq!(schedule.side_for(1), Player::O);
        assert_eq!(SideSchedule::O.side_for(0), Player::O);
    }

    #[test]
    fn defensive_participant_blocks_single_threat() {
        // O to move, X threatens (0, 2)
        let state = BoardState::from_string("XX..O....").unwrap();
        let mut defender = DefensiveParticipant::with_seed("defensive".to_string(), 1);
        assert_eq!(
            defender.select_move(&state).unwrap(),
            Position::new(0, 2).unwrap()
        );
    }

    #[test]
    fn defensive_participant_prefers_own_win() {
        // X to move, both sides threaten; X completes its own row
        let state = BoardState::from_string("XX.OO....").unwrap();
        let mut defender = DefensiveParticipant::with_seed("defensive".to_string(), 1);
        assert_eq!(
            defender.select_move(&state).unwrap(),
            Position::new(0, 2).unwrap()
        );
    }

    #[test]
    fn summary_ignores_unfinished_sessions() {
        let mut summary = EvaluationSummary::default();
        summary.record(SessionStatus::InProgress);
        summary.record(SessionStatus::Lost);
        summary.record(SessionStatus::Drawn);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.policy_wins, 1);
        assert_eq!(summary.draws, 1);
    }

    #[test]
    fn random_participant_only_plays_empty_cells() {
        let state = BoardState::from_string("XOXOXO...").unwrap();
        let mut random = RandomParticipant::with_seed("random".to_string(), 11);
        for _ in 0..20 {
            assert!(state.is_legal(random.select_move(&state).unwrap()));
        }
    }
}
