//! Position evaluation for the minimax search
//!
//! Both evaluators score the board as it would look after a path of moves,
//! read through a [`Forecast`] overlay. Scores are absolute rather than
//! relative to the side on turn:
//! - positive values favour the color player
//! - negative values favour the dot player
//! - `±∞` marks a completed run

use strum::{Display, EnumString};

use crate::board::{Cell, GameBoard, Move, TileView, HEIGHT, WIDTH};
use crate::rules::RUN_TO_WIN;
use crate::search::Forecast;

use super::patterns::{naive_weight, window_score};

/// Direction vectors for window scanning: column, row and both diagonals
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Which extreme a search level is after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    /// `Maximize` for odd parity
    #[inline]
    pub fn from_parity(n: usize) -> Self {
        if n % 2 == 1 {
            Objective::Maximize
        } else {
            Objective::Minimize
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Objective::Maximize => Objective::Minimize,
            Objective::Minimize => Objective::Maximize,
        }
    }

    /// Best achievable score for this objective
    #[inline]
    pub fn extreme(self) -> f64 {
        match self {
            Objective::Maximize => f64::INFINITY,
            Objective::Minimize => f64::NEG_INFINITY,
        }
    }

    /// Whether `candidate` replaces `current`; ties go to the candidate
    #[inline]
    pub fn prefers(self, candidate: f64, current: f64) -> bool {
        match self {
            Objective::Maximize => candidate >= current,
            Objective::Minimize => candidate <= current,
        }
    }
}

/// Evaluator used at the leaves of the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Heuristic {
    /// Weighted tile sum, cheap but blind to lines
    Naive,
    /// Window scan over every line of four
    #[default]
    Informed,
}

impl Heuristic {
    /// Score the board after `path` for a level seeking `objective`
    #[inline]
    pub fn evaluate(self, board: &GameBoard, path: &[Move], objective: Objective) -> f64 {
        match self {
            Heuristic::Naive => naive(board, path),
            Heuristic::Informed => informed(board, path, objective),
        }
    }
}

/// Weighted sum of every stacked tile.
///
/// Each column is read bottom-up until the first gap. A tile weighs its
/// [`naive_weight`] times `row * 10 + column + 1`, so higher cells count more.
pub fn naive(board: &GameBoard, path: &[Move]) -> f64 {
    let view = Forecast::new(board, path);
    let mut score = 0.0;
    for x in 0..WIDTH as u8 {
        for y in 0..HEIGHT as u8 {
            let tile = view.tile(Cell::new(x, y));
            if tile.is_empty() {
                break;
            }
            score += naive_weight(tile) * f64::from(u32::from(y) * 10 + u32::from(x) + 1);
        }
    }
    score
}

/// Sum of [`window_score`] over every four-cell window on the board.
///
/// NaN when both a color run and a fill run are complete.
pub fn window_total<V: TileView + ?Sized>(view: &V) -> f64 {
    let mut score = 0.0;
    let span = RUN_TO_WIN as i32 - 1;
    for x in 0..WIDTH as u8 {
        for y in 0..HEIGHT as u8 {
            let start = Cell::new(x, y);
            for (dx, dy) in DIRECTIONS {
                if start.offset(dx * span, dy * span).is_none() {
                    continue;
                }
                let mut window = [start; RUN_TO_WIN];
                for (i, cell) in window.iter_mut().enumerate() {
                    let step = i as i32;
                    *cell = start.offset(dx * step, dy * step).unwrap_or(start);
                }
                score += window_score(&window.map(|cell| view.tile(cell)));
            }
        }
    }
    score
}

/// Line-aware evaluation of the board after `path`.
///
/// When the path leaves both families with a completed run the raw total is
/// NaN; see [`resolve_double_win`] for how that is settled.
pub fn informed(board: &GameBoard, path: &[Move], objective: Objective) -> f64 {
    let score = window_total(&Forecast::new(board, path));
    if score.is_nan() {
        resolve_double_win(board, path, objective)
    } else {
        score
    }
}

/// Settle a path whose final position shows winning runs for both players.
///
/// Prefixes are scored from longest to shortest. The first clean prefix
/// decides: an infinite score is a win that already stood, a finite one means
/// the next move made both runs at once. That move's author is worked out
/// from the number of path moves after it, relative to the requesting level.
fn resolve_double_win(board: &GameBoard, path: &[Move], objective: Objective) -> f64 {
    for len in (0..path.len()).rev() {
        let earlier = window_total(&Forecast::new(board, &path[..len]));
        if earlier.is_nan() {
            continue;
        }
        if earlier.is_infinite() {
            return earlier;
        }
        let remaining = path.len() - len - 1;
        return if remaining % 2 == 0 {
            objective.extreme()
        } else {
            objective.opposite().extreme()
        };
    }
    objective.extreme()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Placement;

    fn add(id: u8, x: u8, y: u8) -> Move {
        Move::add(Placement::new(id).unwrap(), Cell::new(x, y))
    }

    fn board_with(moves: &[Move]) -> GameBoard {
        let mut board = GameBoard::new();
        for &mv in moves {
            assert!(board.make_move(mv).success(), "{mv}");
        }
        board
    }

    #[test]
    fn test_objective_parity() {
        assert_eq!(Objective::from_parity(1), Objective::Maximize);
        assert_eq!(Objective::from_parity(2), Objective::Minimize);
        assert_eq!(Objective::Maximize.extreme(), f64::INFINITY);
        assert_eq!(Objective::Minimize.opposite(), Objective::Maximize);
        assert!(Objective::Maximize.prefers(1.0, 1.0));
        assert!(Objective::Minimize.prefers(-2.0, 1.0));
        assert!(!Objective::Minimize.prefers(2.0, 1.0));
    }

    #[test]
    fn test_heuristic_names() {
        assert_eq!("naive".parse::<Heuristic>().unwrap(), Heuristic::Naive);
        assert_eq!("Informed".parse::<Heuristic>().unwrap(), Heuristic::Informed);
        assert_eq!(Heuristic::default().to_string(), "informed");
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let board = GameBoard::new();
        assert_eq!(informed(&board, &[], Objective::Maximize), 0.0);
        assert_eq!(naive(&board, &[]), 0.0);
    }

    #[test]
    fn test_naive_single_card() {
        // Red-Full at A1 (weight -2 * 1), White-Open at B1 (weight 1 * 2)
        let board = GameBoard::new();
        assert_eq!(naive(&board, &[add(1, 0, 0)]), 0.0);
        // White-Full at A1 (3 * 1), Red-Open at A2 (-1.5 * 11)
        assert_eq!(naive(&board, &[add(6, 0, 0)]), 3.0 - 16.5);
    }

    #[test]
    fn test_naive_matches_committed_board() {
        let moves = [add(4, 0, 0), add(1, 1, 0), add(8, 0, 2)];
        let board = board_with(&moves);
        assert_eq!(naive(&GameBoard::new(), &moves), naive(&board, &[]));
    }

    #[test]
    fn test_informed_six_cards() {
        let board = board_with(&[
            add(3, 0, 0),
            add(2, 2, 0),
            add(4, 3, 0),
            add(8, 4, 0),
            add(8, 7, 0),
            add(4, 6, 0),
        ]);
        assert_eq!(informed(&board, &[], Objective::Maximize), 370.0);
    }

    #[test]
    fn test_informed_is_path_aware() {
        let moves = [add(3, 0, 0), add(2, 2, 0), add(4, 3, 0)];
        let board = board_with(&moves);
        assert_eq!(
            informed(&GameBoard::new(), &moves, Objective::Minimize),
            informed(&board, &[], Objective::Minimize)
        );
    }

    #[test]
    fn test_single_family_win_is_infinite() {
        // Rows 1 and 2 alternate colors but share a fill: dots only
        let board = board_with(&[add(2, 0, 0), add(8, 1, 0), add(2, 2, 0), add(8, 3, 0)]);
        assert_eq!(informed(&board, &[], Objective::Maximize), f64::NEG_INFINITY);
        assert_eq!(informed(&board, &[], Objective::Minimize), f64::NEG_INFINITY);

        // Red diagonal A1-D4 with mixed fills
        let board = board_with(&[
            add(1, 0, 0),
            add(7, 0, 1),
            add(1, 2, 0),
            add(5, 2, 1),
            add(1, 2, 2),
            add(3, 2, 3),
        ]);
        assert_eq!(informed(&board, &[], Objective::Minimize), f64::INFINITY);
        assert_eq!(informed(&board, &[], Objective::Maximize), f64::INFINITY);
    }

    #[test]
    fn test_double_win_on_committed_board() {
        // Column A is four red-full tiles: both families complete
        let board = board_with(&[add(1, 0, 0), add(1, 0, 1), add(1, 0, 2), add(1, 0, 3)]);
        assert!(window_total(&board).is_nan());
        assert_eq!(informed(&board, &[], Objective::Maximize), f64::INFINITY);
        assert_eq!(informed(&board, &[], Objective::Minimize), f64::NEG_INFINITY);
    }

    #[test]
    fn test_double_win_resolved_by_prefix_parity() {
        let board = board_with(&[add(1, 0, 0), add(1, 0, 1), add(1, 0, 2)]);
        // The first path move makes both runs, one move follows it
        let path = [add(1, 0, 3), add(1, 2, 0)];
        assert_eq!(informed(&board, &path, Objective::Maximize), f64::NEG_INFINITY);

        let board = board_with(&[add(1, 0, 0), add(3, 0, 1), add(1, 2, 0), add(5, 2, 1)]);
        // Diagonal A1-D4 completes on the last move
        let path = [add(1, 2, 2), add(3, 2, 3)];
        assert_eq!(informed(&board, &path, Objective::Minimize), f64::NEG_INFINITY);
        assert_eq!(informed(&board, &path, Objective::Maximize), f64::INFINITY);

        let path = [add(1, 6, 0), add(1, 2, 2), add(3, 2, 3), add(1, 6, 1)];
        assert_eq!(informed(&board, &path, Objective::Maximize), f64::NEG_INFINITY);
    }
}
