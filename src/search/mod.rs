//! Lookahead search for Double Card
//!
//! Contains:
//! - Forecast overlays for reading hypothetical positions
//! - Legal move generation and the move tree
//! - Fixed-depth minimax with optional parallel root

pub mod forecast;
pub mod minimax;
pub mod movegen;

pub use forecast::{forecast_registry, Forecast};
pub use minimax::{Minimax, SearchError, SearchResult};
pub use movegen::{generate_moves, possible_moves, MoveTree};
