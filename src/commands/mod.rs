//! CLI command implementations for process-matcher.
//!
//! This module provides implementations for all CLI subcommands:
//! - `check`: Configuration and pattern validation
//! - `config`: Configuration file generation
//! - `test`: Per-line decision trace for a listing

pub mod check;
pub mod config;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use test::command_test;
