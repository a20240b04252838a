//! AI engine tying move generation, evaluation and search together
//!
//! An [`AIEngine`] plays one side of the game. Each turn it builds the move
//! tree for the configured depth, runs minimax over it and reports the chosen
//! move along with the statistics the trace file and the GUI display.
//!
//! # Example
//!
//! ```
//! use double_card::{AIEngine, EngineConfig, GameBoard, Heuristic, WinCondition};
//!
//! let config = EngineConfig {
//!     depth: 1,
//!     heuristic: Heuristic::Naive,
//!     ..EngineConfig::default()
//! };
//! let engine = AIEngine::with_config(WinCondition::Dots, config);
//!
//! let mut board = GameBoard::new();
//! let result = engine.make_move(&mut board).unwrap();
//! assert_eq!(board.num_moves(), 1);
//! println!("AI played {} ({} evaluations)", result.best_move, result.num_evals);
//! ```

use std::time::Instant;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::board::{GameBoard, Move};
use crate::eval::Heuristic;
use crate::rules::{Verdict, WinCondition};
use crate::search::{possible_moves, Minimax, SearchError};

/// Plies searched when nothing else is configured.
///
/// Two plies are the engine's move and the reply, so the tree spans three
/// levels once the current position is counted as the first.
pub const DEFAULT_DEPTH: usize = 2;

/// Search settings for an [`AIEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies to look ahead, counting the engine's own move; at least 1
    pub depth: usize,
    /// Leaf evaluator
    pub heuristic: Heuristic,
    /// Search root moves on the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            heuristic: Heuristic::Informed,
            parallel: false,
        }
    }
}

/// Fatal engine conditions
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no legal moves for the {0} player")]
    NoLegalMoves(WinCondition),
    #[error("search failed: {0}")]
    Search(SearchError),
    #[error("board rejected generated move {mv}: {verdict}")]
    IllegalMove { mv: Move, verdict: Verdict },
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Move to play
    pub best_move: Move,
    /// Expected line of play, starting with `best_move`
    pub path: Vec<Move>,
    /// Minimax value of the line
    pub score: f64,
    /// Leaf evaluations performed
    pub num_evals: u64,
    /// Value of every root move, in generation order
    pub second_ply: Vec<f64>,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

/// Minimax player for one win condition
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Minimax,
    config: EngineConfig,
}

impl AIEngine {
    /// Engine with the default configuration
    #[must_use]
    pub fn new(win_condition: WinCondition) -> Self {
        Self::with_config(win_condition, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(win_condition: WinCondition, config: EngineConfig) -> Self {
        let config = EngineConfig {
            depth: config.depth.max(1),
            ..config
        };
        Self {
            searcher: Minimax::new(win_condition, config.heuristic).with_parallel(config.parallel),
            config,
        }
    }

    #[inline]
    pub fn win_condition(&self) -> WinCondition {
        self.searcher.win_condition()
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move only; `None` when the engine has nothing to play
    #[must_use]
    pub fn get_move(&self, board: &GameBoard) -> Option<Move> {
        self.get_move_with_stats(board).ok().map(|r| r.best_move)
    }

    /// Search the position without touching the board
    #[instrument(level = "debug", skip_all, fields(player = %self.win_condition(), depth = self.config.depth))]
    pub fn get_move_with_stats(&self, board: &GameBoard) -> Result<MoveResult, EngineError> {
        let start = Instant::now();
        let tree = possible_moves(board, &[], self.config.depth);
        let result = self
            .searcher
            .search(board, &tree)
            .map_err(|err| match err {
                SearchError::NoMoves => EngineError::NoLegalMoves(self.win_condition()),
                err => EngineError::Search(err),
            })?;
        let best_move = result
            .best_move()
            .ok_or(EngineError::NoLegalMoves(self.win_condition()))?;

        Ok(MoveResult {
            best_move,
            path: result.path,
            score: result.score,
            num_evals: result.num_evals,
            second_ply: result.second_ply,
            time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Search and apply the chosen move
    pub fn make_move(&self, board: &mut GameBoard) -> Result<MoveResult, EngineError> {
        let result = self.get_move_with_stats(board)?;
        let verdict = board.make_move(result.best_move);
        if !verdict.success() {
            warn!(mv = %result.best_move, %verdict, "generated move rejected");
            return Err(EngineError::IllegalMove {
                mv: result.best_move,
                verdict,
            });
        }
        info!(
            player = %self.win_condition(),
            mv = %result.best_move,
            score = result.score,
            evals = result.num_evals,
            time_ms = result.time_ms,
            "AI moved"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Placement, MAX_CARDS};

    fn add(id: u8, x: u8, y: u8) -> Move {
        Move::add(Placement::new(id).unwrap(), Cell::new(x, y))
    }

    fn board_with(moves: &[Move]) -> GameBoard {
        let mut board = GameBoard::new();
        for &mv in moves {
            assert!(board.make_move(mv).success());
        }
        board
    }

    fn quick() -> EngineConfig {
        EngineConfig {
            depth: 1,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new(WinCondition::Colors);
        assert_eq!(engine.config().depth, DEFAULT_DEPTH);
        assert_eq!(engine.config().heuristic, Heuristic::Informed);
        assert_eq!(engine.win_condition(), WinCondition::Colors);
    }

    #[test]
    fn test_zero_depth_searches_one_ply() {
        let config = EngineConfig {
            depth: 0,
            ..EngineConfig::default()
        };
        let engine = AIEngine::with_config(WinCondition::Dots, config);
        assert_eq!(engine.config().depth, 1);
        let result = engine.get_move_with_stats(&GameBoard::new()).unwrap();
        assert_eq!(result.path.len(), 1);
    }

    #[test]
    fn test_make_move_applies() {
        let engine = AIEngine::with_config(WinCondition::Colors, quick());
        let mut board = GameBoard::new();
        let result = engine.make_move(&mut board).unwrap();
        assert_eq!(board.num_moves(), 1);
        assert_eq!(board.last_moved(), Some(&result.best_move));
        assert_eq!(result.path, vec![result.best_move]);
        assert_eq!(result.second_ply.len(), 60);
    }

    #[test]
    fn test_engine_wins_column() {
        let mut board = board_with(&[add(7, 1, 0), add(3, 1, 1), add(7, 1, 2)]);
        let engine = AIEngine::new(WinCondition::Colors);
        engine.make_move(&mut board).unwrap();
        let win = board.is_winning_board().unwrap();
        assert!(win.success());
        assert!(WinCondition::Colors.claims(&win));
    }

    #[test]
    fn test_engine_denies_win() {
        let mut board = board_with(&[add(7, 1, 0), add(3, 1, 1), add(7, 1, 2)]);
        let engine = AIEngine::new(WinCondition::Dots);
        engine.make_move(&mut board).unwrap();
        assert!(board.is_winning_board().is_none());
    }

    #[test]
    fn test_engine_recycles_after_all_cards() {
        // Placements cycle per row so no line of four forms
        let mut board = GameBoard::new();
        for (y, id) in [1, 5, 3, 7, 1, 5].into_iter().enumerate() {
            for x in [0, 2, 4, 6] {
                assert!(board.make_move(add(id, x, y as u8)).success());
            }
        }
        assert!(board.is_winning_board().is_none());
        assert_eq!(board.num_moves(), MAX_CARDS);
        let engine = AIEngine::with_config(WinCondition::Dots, quick());
        let result = engine.make_move(&mut board).unwrap();
        assert!(result.best_move.is_recycle());
        assert_eq!(board.placed_cards().len(), MAX_CARDS);
    }
}
