//! Command-line interface for training, inspecting, and evaluating the policy
//! table.

pub mod commands;
pub mod config;
pub mod output;
