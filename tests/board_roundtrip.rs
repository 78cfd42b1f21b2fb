//! Place/undo restores the board exactly

mod common;

use common::{board, pos, reachable_open_states};
use tictactoe_policy::{Error, tictactoe::Cell};

#[test]
fn set_then_unset_restores_every_reachable_state() {
    for state in reachable_open_states() {
        for position in state.empty_positions() {
            let mut scratch = state;
            scratch.set(position).unwrap();
            assert_eq!(scratch.get(position), state.to_move().to_cell());
            assert_eq!(scratch.to_move(), state.to_move().opponent());

            scratch.unset(position);
            assert_eq!(scratch, state, "unset of {position} in {}", state.key());
        }
    }
}

#[test]
fn dropping_the_guard_restores_every_reachable_state() {
    for state in reachable_open_states() {
        let mut scratch = state;
        for position in state.empty_positions() {
            {
                let placed = scratch.play(position).unwrap();
                assert_eq!(placed.occupied_count(), state.occupied_count() + 1);
            }
            assert_eq!(scratch, state);
        }
    }
}

#[test]
fn occupied_cell_is_rejected_without_change() {
    let mut state = board("XO..X....");
    let before = state;
    let err = state.set(pos(1, 1)).unwrap_err();
    assert!(matches!(err, Error::IllegalMove { position } if position == pos(1, 1)));
    assert!(state.play(pos(0, 1)).is_err());
    assert_eq!(state, before);
    assert_eq!(state.get(pos(1, 1)), Cell::X);
}
