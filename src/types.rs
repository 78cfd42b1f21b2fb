//! Newtype wrappers for board coordinates and table keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of rows (and columns) on the board.
pub const BOARD_SIDE: usize = 3;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = BOARD_SIDE * BOARD_SIDE;

/// A cell coordinate on the board, `(row, col)` with both in `0..3`.
///
/// Positions order row-major, which is also the scan order the trainer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: usize,
    col: usize,
}

/// Unchecked wire form of [`Position`]
#[derive(Deserialize)]
struct RawPosition {
    row: usize,
    col: usize,
}

impl TryFrom<RawPosition> for Position {
    type Error = crate::Error;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.col)
    }
}

impl Position {
    /// Create a new position, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if either coordinate is >= 3.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < BOARD_SIDE && col < BOARD_SIDE {
            Ok(Position { row, col })
        } else {
            Err(crate::Error::InvalidPosition { row, col })
        }
    }

    /// Create a position from a row-major index (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if the index is >= 9.
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        Self::new(index / BOARD_SIDE, index % BOARD_SIDE)
    }

    /// All nine positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).map(|index| Position {
            row: index / BOARD_SIDE,
            col: index % BOARD_SIDE,
        })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row-major index of this position.
    pub fn index(&self) -> usize {
        self.row * BOARD_SIDE + self.col
    }

    /// Whether this cell lies on the main diagonal (top-left to bottom-right).
    pub fn on_main_diagonal(&self) -> bool {
        self.row == self.col
    }

    /// Whether this cell lies on the anti-diagonal (top-right to bottom-left).
    pub fn on_anti_diagonal(&self) -> bool {
        self.row + self.col == BOARD_SIDE - 1
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> Self {
        pos.index()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Raw serialization of a board's grid, used to key the policy table.
///
/// Nine characters in row-major order: `X`, `O`, or `.` for an empty cell.
/// No symmetry folding and no move-order information.
///
/// # Examples
///
/// ```
/// use tictactoe_policy::tictactoe::BoardState;
///
/// let state = BoardState::from_string("XX.OO....").unwrap();
/// assert_eq!(state.key().as_str(), "XX.OO....");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct BoardKey(String);

impl BoardKey {
    /// Parse and validate a key by parsing it as a board.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid board encoding.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        Ok(crate::tictactoe::BoardState::from_string(s)?.key())
    }

    /// Build a key from already-encoded cells (internal use).
    pub(crate) fn from_encoded(encoded: String) -> Self {
        debug_assert_eq!(encoded.len(), BOARD_SIZE);
        BoardKey(encoded)
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for BoardKey {
    type Error = crate::Error;

    fn try_from(encoded: String) -> Result<Self, Self::Error> {
        Self::parse(&encoded)
    }
}

impl AsRef<str> for BoardKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialized_positions_are_bounds_checked() {
        let pos: Position = serde_json::from_str(r#"{"row":2,"col":1}"#).unwrap();
        assert_eq!(pos, Position::new(2, 1).unwrap());

        let err = serde_json::from_str::<Position>(r#"{"row":7,"col":0}"#).unwrap_err();
        assert!(err.to_string().contains("out of bounds"), "{err}");
    }

    #[test]
    fn deserialized_keys_must_be_valid_boards() {
        let key: BoardKey = serde_json::from_str(r#""XX.OO....""#).unwrap();
        assert_eq!(key.as_str(), "XX.OO....");

        assert!(serde_json::from_str::<BoardKey>(r#""XXXX.....""#).is_err());
        assert!(serde_json::from_str::<BoardKey>(r#""XO?......""#).is_err());
    }

    #[test]
    fn test_position_validation() {
        assert!(Position::new(0, 0).is_ok());
        assert!(Position::new(2, 2).is_ok());
        assert!(Position::new(3, 0).is_err());
        assert!(Position::new(0, 3).is_err());
        assert!(Position::from_index(9).is_err());
    }

    #[test]
    fn test_position_index_is_row_major() {
        let pos = Position::new(1, 2).unwrap();
        assert_eq!(pos.index(), 5);
        assert_eq!(Position::from_index(5).unwrap(), pos);

        let order: Vec<usize> = Position::all().map(|p| p.index()).collect();
        assert_eq!(order, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_diagonal_membership() {
        let center = Position::new(1, 1).unwrap();
        assert!(center.on_main_diagonal());
        assert!(center.on_anti_diagonal());

        let edge = Position::new(0, 1).unwrap();
        assert!(!edge.on_main_diagonal());
        assert!(!edge.on_anti_diagonal());

        let corner = Position::new(2, 0).unwrap();
        assert!(!corner.on_main_diagonal());
        assert!(corner.on_anti_diagonal());
    }

    #[test]
    fn test_board_key_parse() {
        let key = BoardKey::parse("X...O....").unwrap();
        assert_eq!(key.as_str(), "X...O....");
        assert!(BoardKey::parse("XXXX.....").is_err());
    }
}
