//! Game rules for Double Card
//!
//! This module implements the rule set including:
//! - Named-condition verdicts for legality and outcomes
//! - Win conditions (four in a row per attribute family, move-limit draw)
//!
//! Move legality itself lives on [`crate::board::GameBoard`], which owns the
//! state the checks need.

pub mod verdict;
pub mod win;

// Re-exports for convenient access
pub use verdict::{Aggregation, Condition, Verdict};
pub use win::{
    check_line_win, check_outcome, find_winning_line, lines, Line, WinCondition, WinningLine,
    RUN_TO_WIN,
};
