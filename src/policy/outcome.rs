//! Outcome classes for backward induction

use std::fmt;

use serde::{Deserialize, Serialize};

/// Game-theoretic value of a state for the player about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutcomeClass {
    Win,
    Draw,
    Loss,
}

impl OutcomeClass {
    /// All classes, in order of preference for the mover.
    pub const ALL: [OutcomeClass; 3] = [OutcomeClass::Win, OutcomeClass::Draw, OutcomeClass::Loss];

    /// Value of a move given the value of the state it hands to the opponent.
    ///
    /// A state the opponent wins from is a losing move for us, and vice versa.
    pub fn from_opponent(opponent: OutcomeClass) -> OutcomeClass {
        match opponent {
            OutcomeClass::Win => OutcomeClass::Loss,
            OutcomeClass::Loss => OutcomeClass::Win,
            OutcomeClass::Draw => OutcomeClass::Draw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeClass::Win => "win",
            OutcomeClass::Draw => "draw",
            OutcomeClass::Loss => "loss",
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classes seen among the moves of one state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeenClasses {
    win: bool,
    draw: bool,
    loss: bool,
}

impl SeenClasses {
    pub fn insert(&mut self, class: OutcomeClass) {
        match class {
            OutcomeClass::Win => self.win = true,
            OutcomeClass::Draw => self.draw = true,
            OutcomeClass::Loss => self.loss = true,
        }
    }

    /// Classify the state these moves belong to.
    ///
    /// Any winning move wins. Otherwise the state draws unless every move
    /// loses.
    pub fn classify(&self) -> OutcomeClass {
        if self.win {
            OutcomeClass::Win
        } else if !self.loss || self.draw {
            OutcomeClass::Draw
        } else {
            OutcomeClass::Loss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_mapping_is_an_involution() {
        for class in OutcomeClass::ALL {
            assert_eq!(
                OutcomeClass::from_opponent(OutcomeClass::from_opponent(class)),
                class
            );
        }
        assert_eq!(OutcomeClass::from_opponent(OutcomeClass::Win), OutcomeClass::Loss);
        assert_eq!(OutcomeClass::from_opponent(OutcomeClass::Draw), OutcomeClass::Draw);
    }

    #[test]
    fn classification_priority() {
        let mut seen = SeenClasses::default();
        seen.insert(OutcomeClass::Loss);
        assert_eq!(seen.classify(), OutcomeClass::Loss);

        seen.insert(OutcomeClass::Draw);
        assert_eq!(seen.classify(), OutcomeClass::Draw);

        seen.insert(OutcomeClass::Win);
        assert_eq!(seen.classify(), OutcomeClass::Win);
    }

    #[test]
    fn nothing_seen_is_a_draw() {
        assert_eq!(SeenClasses::default().classify(), OutcomeClass::Draw);
    }
}
