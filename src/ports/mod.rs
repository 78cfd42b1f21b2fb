//! Ports (trait boundaries) between the session driver and move sources.

pub mod participant;

pub use participant::Participant;
