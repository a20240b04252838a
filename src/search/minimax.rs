//! Fixed-depth minimax over a [`MoveTree`]
//!
//! Scores are absolute (positive favours colors), so instead of negamax each
//! level picks its own extreme. The player on turn at the root maximizes when
//! it plays colors and minimizes when it plays dots; levels alternate below.
//!
//! Every branch is searched: there is no pruning or transposition table, and
//! the number of leaf evaluations is reported with the result.
//!
//! # Example
//!
//! ```
//! use double_card::board::GameBoard;
//! use double_card::eval::Heuristic;
//! use double_card::rules::WinCondition;
//! use double_card::search::{possible_moves, Minimax};
//!
//! let board = GameBoard::new();
//! let tree = possible_moves(&board, &[], 1);
//! let searcher = Minimax::new(WinCondition::Colors, Heuristic::Informed);
//! let result = searcher.search(&board, &tree)?;
//! assert_eq!(result.num_evals, tree.len() as u64);
//! # Ok::<(), double_card::search::SearchError>(())
//! ```

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::board::{GameBoard, Move};
use crate::eval::{Heuristic, Objective};
use crate::rules::WinCondition;

use super::movegen::MoveTree;

/// Outcome of a search from the root
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Principal variation, root move first
    pub path: Vec<Move>,
    /// Value of the principal variation
    pub score: f64,
    /// Leaf evaluations performed
    pub num_evals: u64,
    /// Value of each root move in generation order
    pub second_ply: Vec<f64>,
}

impl SearchResult {
    /// Move to play now
    #[inline]
    pub fn best_move(&self) -> Option<Move> {
        self.path.first().copied()
    }
}

/// Trees the searcher cannot score
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no moves at the root")]
    NoMoves,
    #[error("no moves below ply {level} after {}", fmt_line(.after))]
    EmptyBranch { level: usize, after: Vec<Move> },
}

fn fmt_line(line: &[Move]) -> String {
    let moves: Vec<String> = line.iter().map(Move::to_string).collect();
    moves.join(", ")
}

/// Best line found below one node
#[derive(Debug)]
struct Scored {
    score: f64,
    path: Vec<Move>,
    evals: u64,
}

/// Pick the preferred candidate, later ones winning ties
fn select(objective: Objective, candidates: impl IntoIterator<Item = Scored>) -> Option<Scored> {
    let mut evals = 0;
    let mut best: Option<Scored> = None;
    for candidate in candidates {
        evals += candidate.evals;
        if best
            .as_ref()
            .map_or(true, |b| objective.prefers(candidate.score, b.score))
        {
            best = Some(candidate);
        }
    }
    best.map(|b| Scored { evals, ..b })
}

/// Minimax searcher for one player
#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    win_condition: WinCondition,
    heuristic: Heuristic,
    parallel: bool,
}

impl Minimax {
    pub fn new(win_condition: WinCondition, heuristic: Heuristic) -> Self {
        Self {
            win_condition,
            heuristic,
            parallel: false,
        }
    }

    /// Evaluate root moves on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline]
    pub fn win_condition(&self) -> WinCondition {
        self.win_condition
    }

    /// Objective at a tree level; the root is level 1
    #[inline]
    pub fn objective_at(&self, level: usize) -> Objective {
        Objective::from_parity(level + usize::from(self.win_condition.is_fill()))
    }

    /// Search `tree`, which holds continuations of `board`.
    ///
    /// Fails with [`SearchError::NoMoves`] when the root has no moves and
    /// with [`SearchError::EmptyBranch`] when any move below it has none.
    #[instrument(level = "debug", skip_all, fields(player = %self.win_condition, branches = tree.len()))]
    pub fn search(&self, board: &GameBoard, tree: &MoveTree) -> Result<SearchResult, SearchError> {
        let children: Result<Vec<Scored>, SearchError> = match tree {
            MoveTree::Leaf(moves) => {
                let objective = self.objective_at(1);
                let score_one = |mv: &Move| {
                    Ok::<_, SearchError>(Scored {
                        score: self.heuristic.evaluate(board, std::slice::from_ref(mv), objective),
                        path: vec![*mv],
                        evals: 1,
                    })
                };
                if self.parallel {
                    moves.par_iter().map(score_one).collect()
                } else {
                    moves.iter().map(score_one).collect()
                }
            }
            MoveTree::Node(branches) => {
                let score_branch = |(mv, replies): &(Move, MoveTree)| {
                    let mut path = vec![*mv];
                    self.evaluate(board, replies, &mut path, 2)
                };
                if self.parallel {
                    branches.par_iter().map(score_branch).collect()
                } else {
                    branches.iter().map(score_branch).collect()
                }
            }
        };

        let children = children?;
        let second_ply = children.iter().map(|c| c.score).collect();
        let best = select(self.objective_at(1), children).ok_or(SearchError::NoMoves)?;
        debug!(score = best.score, evals = best.evals, "search finished");
        Ok(SearchResult {
            path: best.path,
            score: best.score,
            num_evals: best.evals,
            second_ply,
        })
    }

    /// Best line below `tree`, with `path` leading to it
    fn evaluate(
        &self,
        board: &GameBoard,
        tree: &MoveTree,
        path: &mut Vec<Move>,
        level: usize,
    ) -> Result<Scored, SearchError> {
        let empty = |path: &[Move]| SearchError::EmptyBranch {
            level,
            after: path.to_vec(),
        };
        let objective = self.objective_at(level);
        match tree {
            MoveTree::Leaf(moves) => {
                let mut best: Option<(f64, Move)> = None;
                for &mv in moves {
                    path.push(mv);
                    let score = self.heuristic.evaluate(board, path, objective);
                    path.pop();
                    if best.map_or(true, |(b, _)| objective.prefers(score, b)) {
                        best = Some((score, mv));
                    }
                }
                let (score, mv) = best.ok_or_else(|| empty(path.as_slice()))?;
                let mut line = path.clone();
                line.push(mv);
                Ok(Scored {
                    score,
                    path: line,
                    evals: moves.len() as u64,
                })
            }
            MoveTree::Node(branches) => {
                let mut scored = Vec::with_capacity(branches.len());
                for (mv, replies) in branches {
                    path.push(*mv);
                    let child = self.evaluate(board, replies, path, level + 1);
                    path.pop();
                    scored.push(child?);
                }
                select(objective, scored).ok_or_else(|| empty(path.as_slice()))
            }
        }
    }
}
