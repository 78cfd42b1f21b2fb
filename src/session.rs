//! Game session between a human participant and the trained policy

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    error::Error,
    policy::{MoveSelector, PolicyTable},
    tictactoe::{BoardState, Player},
    types::Position,
};

/// Which side of the session a move belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Human,
    Automated,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::Automated => "automated",
        }
    }
}

/// Lifecycle of a session, from the human participant's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
    Drawn,
}

impl SessionStatus {
    pub fn is_over(&self) -> bool {
        matches!(
            self,
            SessionStatus::Won | SessionStatus::Lost | SessionStatus::Drawn
        )
    }
}

/// What the presentation layer is told after each move, from the human
/// participant's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveReport {
    Continue,
    Win,
    Loss,
    Draw,
}

/// A move in the session history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub player: Player,
    pub role: Role,
}

/// One game against the automated participant.
///
/// The session owns its board exclusively; the policy table is shared
/// read-only and survives restarts and side swaps.
#[derive(Debug, Clone)]
pub struct GameSession {
    policy: Arc<PolicyTable>,
    selector: MoveSelector,
    board: BoardState,
    human_side: Player,
    status: SessionStatus,
    moves: Vec<Move>,
}

impl GameSession {
    /// Create a session where the human plays `human_side`
    pub fn new(policy: Arc<PolicyTable>, human_side: Player) -> Self {
        Self::with_selector(policy, human_side, MoveSelector::new())
    }

    /// Create a session with an explicit (e.g. seeded) selector
    pub fn with_selector(
        policy: Arc<PolicyTable>,
        human_side: Player,
        selector: MoveSelector,
    ) -> Self {
        Self {
            policy,
            selector,
            board: BoardState::new(),
            human_side,
            status: SessionStatus::NotStarted,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn human_side(&self) -> Player {
        self.human_side
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn policy(&self) -> &Arc<PolicyTable> {
        &self.policy
    }

    /// Whose move it is on the current board
    pub fn whose_turn(&self) -> Role {
        if self.board.to_move() == self.human_side {
            Role::Human
        } else {
            Role::Automated
        }
    }

    /// Let the automated participant open if it plays X.
    ///
    /// Returns the opening move, or `None` when the human opens or the session
    /// has already started.
    ///
    /// # Errors
    ///
    /// Propagates selection errors from [`play_automated`](Self::play_automated).
    pub fn start(&mut self) -> Result<Option<(Position, MoveReport)>> {
        if self.status != SessionStatus::NotStarted || self.whose_turn() != Role::Automated {
            return Ok(None);
        }
        self.play_automated().map(Some)
    }

    /// Play a human move.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the session has ended
    /// - [`Error::NotYourTurn`] if the automated participant is to move
    /// - [`Error::IllegalMove`] if the cell is occupied; nothing changes
    pub fn play_human(&mut self, position: Position) -> Result<MoveReport> {
        self.apply(position, Role::Human)
    }

    /// Ask the policy for a move and play it.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the session has ended
    /// - [`Error::NotYourTurn`] if the human is to move
    /// - [`Error::UntrainedState`] or [`Error::NoPlayableMove`] from the selector
    pub fn play_automated(&mut self) -> Result<(Position, MoveReport)> {
        self.ensure_turn(Role::Automated)?;
        let position = self.selector.choose_move(&self.board, &self.policy)?;
        let report = self.apply(position, Role::Automated)?;
        Ok((position, report))
    }

    /// Start over with an empty board and the same sides
    pub fn restart(&mut self) {
        debug!(moves = self.moves.len(), "Restarting session");
        self.board = BoardState::new();
        self.status = SessionStatus::NotStarted;
        self.moves.clear();
    }

    /// Swap which side the human plays and restart
    pub fn swap_sides(&mut self) {
        self.human_side = self.human_side.opponent();
        info!(human_side = %self.human_side, "Swapped sides");
        self.restart();
    }

    fn ensure_turn(&self, role: Role) -> Result<()> {
        if self.status.is_over() {
            return Err(Error::GameOver);
        }
        if self.whose_turn() != role {
            return Err(Error::NotYourTurn {
                participant: role.as_str(),
            });
        }
        Ok(())
    }

    fn apply(&mut self, position: Position, role: Role) -> Result<MoveReport> {
        self.ensure_turn(role)?;

        let player = self.board.to_move();
        self.board.set(position)?;
        self.moves.push(Move {
            position,
            player,
            role,
        });

        let (status, report) = if self.board.is_winning_move(position) {
            match role {
                Role::Human => (SessionStatus::Won, MoveReport::Win),
                Role::Automated => (SessionStatus::Lost, MoveReport::Loss),
            }
        } else if self.board.is_full() {
            (SessionStatus::Drawn, MoveReport::Draw)
        } else {
            (SessionStatus::InProgress, MoveReport::Continue)
        };

        debug!(role = role.as_str(), %player, %position, ?status, "Move played");
        if status.is_over() {
            info!(?status, moves = self.moves.len(), "Session finished");
        }
        self.status = status;
        Ok(report)
    }
}
