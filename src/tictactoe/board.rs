//! Board state representation and in-place move operations

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::types::{BOARD_SIDE, BOARD_SIZE, BoardKey, Position};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game. X always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// The grid plus whose turn it is.
///
/// The player to move always agrees with the number of filled cells: an even
/// count means X moves, an odd count means O moves. Fields are private so the
/// only way to change the grid is through [`set`](Self::set) and
/// [`unset`](Self::unset), which keep the two in step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoardState {
    cells: [Cell; BOARD_SIZE],
    to_move: Player,
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        BoardState {
            cells: [Cell::Empty; BOARD_SIZE],
            to_move: Player::X,
        }
    }

    /// Helper: Parse 9 cells from a slice of characters.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 characters or any character is invalid.
    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; BOARD_SIZE], crate::Error> {
        if chars.len() < BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (i, &c) in chars.iter().take(BOARD_SIZE).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    fn count_pieces(cells: &[Cell; BOARD_SIZE]) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    fn turn_from_counts(count: PieceCount) -> Result<Player, crate::Error> {
        if count.x == count.o {
            Ok(Player::X)
        } else if count.x == count.o + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 9 cell characters in row-major order
    /// (`X`, `O`, or `.`); whitespace and `/` row separators are ignored. The
    /// player to move is derived from the piece counts.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The board has fewer than 9 cell characters
    /// - Any character is not a valid cell representation
    /// - The piece counts are not equal or X ahead by one
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        let cells = Self::parse_cells(&chars, s)?;
        let to_move = Self::turn_from_counts(Self::count_pieces(&cells))?;
        Ok(BoardState { cells, to_move })
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// The player about to move
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Get the cell at a position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Whether playing at `pos` targets an empty cell.
    ///
    /// Input layers call this to validate a user-supplied coordinate before
    /// attempting the move.
    pub fn is_legal(&self, pos: Position) -> bool {
        self.is_empty(pos)
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Mark `pos` for the player to move and pass the turn.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] if the cell is occupied; the board
    /// is left unchanged.
    pub fn set(&mut self, pos: Position) -> Result<(), crate::Error> {
        if !self.is_empty(pos) {
            return Err(crate::Error::IllegalMove { position: pos });
        }

        self.cells[pos.index()] = self.to_move.to_cell();
        self.to_move = self.to_move.opponent();
        debug_assert!(self.turn_is_consistent());
        Ok(())
    }

    /// Reverse the most recent [`set`](Self::set), which must have targeted `pos`.
    ///
    /// Flips the turn back, then clears the cell. This is not a general clear:
    /// calling it on any other cell breaks the turn invariant.
    pub fn unset(&mut self, pos: Position) {
        self.to_move = self.to_move.opponent();
        debug_assert_eq!(
            self.cells[pos.index()],
            self.to_move.to_cell(),
            "unset({pos}) does not reverse the most recent set"
        );
        self.cells[pos.index()] = Cell::Empty;
        debug_assert!(self.turn_is_consistent());
    }

    /// Play `pos` for the duration of the returned guard.
    ///
    /// The guard derefs to the board so callers can inspect or recurse into the
    /// resulting position; dropping it runs [`unset`](Self::unset). Nested
    /// guards must be dropped innermost first, which scoping guarantees.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] if the cell is occupied.
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_policy::{tictactoe::BoardState, types::Position};
    ///
    /// let mut board = BoardState::new();
    /// let center = Position::new(1, 1).unwrap();
    /// {
    ///     let placed = board.play(center).unwrap();
    ///     assert_eq!(placed.occupied_count(), 1);
    /// }
    /// assert_eq!(board, BoardState::new());
    /// ```
    pub fn play(&mut self, pos: Position) -> Result<PlacedMove<'_>, crate::Error> {
        self.set(pos)?;
        Ok(PlacedMove {
            board: self,
            position: pos,
        })
    }

    /// Whether the mark at `pos` completes three in a row.
    ///
    /// Only the row, column, and diagonals through `pos` are examined; a new
    /// line can only appear through the cell just played.
    pub fn is_winning_move(&self, pos: Position) -> bool {
        LineAnalyzer::completes_line(&self.cells, pos)
    }

    /// Whether every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if a player has three in a row anywhere on the board
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Raw grid serialization used to key the policy table
    pub fn key(&self) -> BoardKey {
        BoardKey::from_encoded(self.cells.iter().map(|&c| c.to_char()).collect())
    }

    fn turn_is_consistent(&self) -> bool {
        matches!(
            Self::turn_from_counts(Self::count_pieces(&self.cells)),
            Ok(player) if player == self.to_move
        )
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(BOARD_SIDE).enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i + 1 < BOARD_SIDE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// A move held on the board until the guard is dropped.
///
/// Returned by [`BoardState::play`]. Dropping it undoes the move, so a search
/// that returns early from inside the guard's scope still leaves the board as
/// it found it.
#[derive(Debug)]
pub struct PlacedMove<'a> {
    board: &'a mut BoardState,
    position: Position,
}

impl PlacedMove<'_> {
    /// The cell this guard occupies
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the held move completed a line
    pub fn is_winning(&self) -> bool {
        self.board.is_winning_move(self.position)
    }
}

impl Deref for PlacedMove<'_> {
    type Target = BoardState;

    fn deref(&self) -> &BoardState {
        self.board
    }
}

impl DerefMut for PlacedMove<'_> {
    fn deref_mut(&mut self) -> &mut BoardState {
        self.board
    }
}

impl Drop for PlacedMove<'_> {
    fn drop(&mut self) {
        self.board.unset(self.position);
    }
}
