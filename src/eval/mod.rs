//! Position evaluation for Double Card
//!
//! - [`patterns`]: weight tables and four-cell window counting
//! - [`heuristic`]: the naive and informed evaluators plus search objectives

pub mod heuristic;
pub mod patterns;

pub use heuristic::{informed, naive, window_total, Heuristic, Objective};
pub use patterns::{naive_weight, window_runs, window_score, NaiveWeight, RUN_WEIGHTS};
