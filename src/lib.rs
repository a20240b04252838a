//! Double Card game engine and minimax AI
//!
//! Double Card is played on an 8x12 board with 24 two-tile cards. Each tile
//! carries a color (red or white) and a dot (full or open). One player wins
//! by lining up four tiles of one color, the other by four tiles with the
//! same dot. Once every card is on the board, turns recycle an uncovered card
//! to a new spot, and the game is drawn after 60 moves.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Cells, tiles, cards, move notation and the legality checks
//! - [`rules`]: Named-condition verdicts and four-in-a-row detection
//! - [`eval`]: The naive and informed leaf evaluators
//! - [`search`]: Forecast overlays, move-tree generation and minimax
//! - [`engine`]: AI player wiring generation, evaluation and search together
//! - [`session`]: Text game loop between human and computer players
//! - [`trace`]: Plain-text record of each AI decision
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use double_card::{AIEngine, EngineConfig, GameBoard, Heuristic, WinCondition};
//!
//! let mut board = GameBoard::new();
//! let mv = "0 4 A 1".parse().unwrap();
//! assert!(board.make_move(mv).success());
//!
//! // AI answers for the dots player, one ply deep
//! let config = EngineConfig {
//!     depth: 1,
//!     heuristic: Heuristic::Informed,
//!     ..EngineConfig::default()
//! };
//! let engine = AIEngine::with_config(WinCondition::Dots, config);
//! if let Some(reply) = engine.get_move(&board) {
//!     assert!(board.make_move(reply).success());
//!     println!("AI plays {reply}");
//! }
//! ```

pub mod board;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;
pub mod trace;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Cell, GameBoard, Move, Placement, Tile};
pub use engine::{AIEngine, EngineConfig, EngineError, MoveResult};
pub use eval::Heuristic;
pub use rules::{Verdict, WinCondition};
