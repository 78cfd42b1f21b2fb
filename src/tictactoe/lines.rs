//! Winning line analysis for Tic-Tac-Toe

use std::collections::BTreeSet;

use super::{Cell, Player};
use crate::types::{BOARD_SIDE, BOARD_SIZE, Position};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    MAIN_DIAGONAL,
    ANTI_DIAGONAL,
];

const MAIN_DIAGONAL: [usize; 3] = [0, 4, 8];
const ANTI_DIAGONAL: [usize; 3] = [2, 4, 6];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// The row, the column, and any diagonals passing through `pos`
    pub fn lines_through(pos: Position) -> impl Iterator<Item = [usize; 3]> {
        let row_start = pos.row() * BOARD_SIDE;
        let row = [row_start, row_start + 1, row_start + 2];
        let col = [pos.col(), pos.col() + BOARD_SIDE, pos.col() + 2 * BOARD_SIDE];

        [
            Some(row),
            Some(col),
            pos.on_main_diagonal().then_some(MAIN_DIAGONAL),
            pos.on_anti_diagonal().then_some(ANTI_DIAGONAL),
        ]
        .into_iter()
        .flatten()
    }

    /// Check whether any line through `pos` holds three equal marks
    pub fn completes_line(cells: &[Cell; BOARD_SIZE], pos: Position) -> bool {
        Self::lines_through(pos).any(|line| Self::is_complete(cells, &line))
    }

    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; BOARD_SIZE], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Find all positions that would immediately win for the player
    pub fn winning_moves(cells: &[Cell; BOARD_SIZE], player: Player) -> BTreeSet<Position> {
        WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(cells, player, line))
            .filter_map(|idx| Position::from_index(idx).ok())
            .collect()
    }

    fn is_complete(cells: &[Cell; BOARD_SIZE], line: &[usize; 3]) -> bool {
        let first = cells[line[0]];
        first != Cell::Empty && line.iter().all(|&idx| cells[idx] == first)
    }

    /// Find the winning move position in a specific line, if one exists
    fn winning_move_in_line(
        cells: &[Cell; BOARD_SIZE],
        player: Player,
        line: &[usize; 3],
    ) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None,
            }
        }

        if count == 2 { empty_pos } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_lines_through_corner_edge_and_center() {
        assert_eq!(LineAnalyzer::lines_through(pos(0, 0)).count(), 3);
        assert_eq!(LineAnalyzer::lines_through(pos(0, 1)).count(), 2);
        assert_eq!(LineAnalyzer::lines_through(pos(1, 1)).count(), 4);
        assert_eq!(LineAnalyzer::lines_through(pos(2, 0)).count(), 3);

        for p in Position::all() {
            for line in LineAnalyzer::lines_through(p) {
                assert!(line.contains(&p.index()), "{line:?} misses {p}");
                assert!(WINNING_LINES.contains(&line));
            }
        }
    }

    #[test]
    fn test_completes_line() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::O;
        cells[4] = Cell::O;
        cells[6] = Cell::O;

        assert!(LineAnalyzer::completes_line(&cells, pos(2, 0)));
        assert!(LineAnalyzer::completes_line(&cells, pos(1, 1)));
        assert!(!LineAnalyzer::completes_line(&cells, pos(0, 0)));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::O;
        cells[3] = Cell::O;
        cells[6] = Cell::O;

        assert!(LineAnalyzer::has_won(&cells, Player::O));
        assert!(!LineAnalyzer::has_won(&cells, Player::X));
    }

    #[test]
    fn test_winning_moves_multiple() {
        // XX.
        // X..
        // ...
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[3] = Cell::X;

        let moves = LineAnalyzer::winning_moves(&cells, Player::X);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&pos(0, 2)));
        assert!(moves.contains(&pos(2, 0)));
        assert!(LineAnalyzer::winning_moves(&cells, Player::O).is_empty());
    }
}
