//! Policy training and lookup
//!
//! [`Trainer`] builds a [`PolicyTable`] once by backward induction over every
//! alternating-play sequence from the empty board. [`MoveSelector`] reads it
//! at play time and only ever returns winning or drawing moves.

pub mod outcome;
pub mod selector;
pub mod table;
pub mod trainer;

pub use outcome::{OutcomeClass, SeenClasses};
pub use selector::{MoveSelector, choose_classified_move, choose_move};
pub use table::{PolicyEntry, PolicyTable, TableSummary};
pub use trainer::{SearchMode, Trainer, TrainerConfig, TrainingStats, train};
