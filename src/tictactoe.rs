//! Tic-Tac-Toe board and rules

pub mod board;
pub mod lines;

pub use board::{BoardState, Cell, PlacedMove, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
