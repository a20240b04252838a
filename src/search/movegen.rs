//! Legal move enumeration for lookahead
//!
//! Moves are generated against a [`Forecast`], so the search can look several
//! plies ahead of the committed board without applying anything.

use crate::board::game_board::cells_above;
use crate::board::{Cell, GameBoard, Move, Placement, TileView, HEIGHT, MAX_CARDS, WIDTH};

use super::forecast::{forecast_registry, Forecast};

/// Continuations from a position, one level per ply.
///
/// `Node` pairs each move with the replies to it; `Leaf` holds the moves of
/// the last ply. Order is generation order at every level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTree {
    Node(Vec<(Move, MoveTree)>),
    Leaf(Vec<Move>),
}

impl MoveTree {
    /// Moves available at this level
    pub fn moves(&self) -> Vec<Move> {
        match self {
            MoveTree::Node(children) => children.iter().map(|(mv, _)| *mv).collect(),
            MoveTree::Leaf(moves) => moves.clone(),
        }
    }

    /// Branch count at this level
    pub fn len(&self) -> usize {
        match self {
            MoveTree::Node(children) => children.len(),
            MoveTree::Leaf(moves) => moves.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of complete paths through the tree
    pub fn leaf_count(&self) -> usize {
        match self {
            MoveTree::Node(children) => children.iter().map(|(_, sub)| sub.leaf_count()).sum(),
            MoveTree::Leaf(moves) => moves.len(),
        }
    }
}

/// Every placement that fits on the current skyline.
///
/// Vertical cards go on top of a column with two free rows. Horizontal cards
/// need the column to the right at the same height.
fn skyline_placements<V: TileView + ?Sized>(view: &V, mut emit: impl FnMut(Placement, Cell)) {
    let heights: Vec<usize> = (0..WIDTH as u8).map(|x| view.column_height(x)).collect();
    for (x, &height) in heights.iter().enumerate() {
        if height >= HEIGHT {
            continue;
        }
        let anchor = Cell::new(x as u8, height as u8);
        if height < HEIGHT - 1 {
            for placement in Placement::VERTICAL {
                emit(placement, anchor);
            }
        }
        if heights.get(x + 1) == Some(&height) {
            for placement in Placement::HORIZONTAL {
                emit(placement, anchor);
            }
        }
    }
}

/// Legal moves for the player on turn after `forecast` has been played
pub fn generate_moves(board: &GameBoard, forecast: &[Move]) -> Vec<Move> {
    let view = Forecast::new(board, forecast);
    let mut moves = Vec::with_capacity(64);

    if board.num_moves() + forecast.len() < MAX_CARDS {
        skyline_placements(&view, |placement, anchor| {
            moves.push(Move::add(placement, anchor))
        });
        return moves;
    }

    let registry = forecast_registry(board, forecast);
    // The card moved last is locked for one turn
    let candidates = registry.split_last().map_or(&[][..], |(_, rest)| rest);
    for card in candidates {
        let Some(from) = card.cells() else {
            continue;
        };
        if !cells_above(card).all(|cell| view.is_empty(cell)) {
            continue;
        }
        let lifted = view.lifted(from);
        skyline_placements(&lifted, |placement, anchor| {
            if anchor != card.anchor || placement != card.placement {
                moves.push(Move::recycle(from, placement, anchor));
            }
        });
    }
    moves
}

/// Tree of legal continuations `depth` plies deep (at least one)
pub fn possible_moves(board: &GameBoard, forecast: &[Move], depth: usize) -> MoveTree {
    let moves = generate_moves(board, forecast);
    if depth <= 1 {
        return MoveTree::Leaf(moves);
    }

    let mut path = Vec::with_capacity(forecast.len() + depth);
    path.extend_from_slice(forecast);
    let children = moves
        .into_iter()
        .map(|mv| {
            path.push(mv);
            let replies = possible_moves(board, &path, depth - 1);
            path.pop();
            (mv, replies)
        })
        .collect();
    MoveTree::Node(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(id: u8, x: u8, y: u8) -> Move {
        Move::add(Placement::new(id).unwrap(), Cell::new(x, y))
    }

    #[test]
    fn test_empty_board_moves() {
        let board = GameBoard::new();
        let moves = generate_moves(&board, &[]);
        // 8 columns of verticals, 7 horizontal slots
        assert_eq!(moves.len(), 8 * 4 + 7 * 4);
        assert!(moves.iter().all(|mv| !mv.is_recycle()));
        assert!(moves.iter().all(|mv| board.verify(mv).success()));
        assert_eq!(moves[0], add(2, 0, 0));
    }

    #[test]
    fn test_uneven_columns_block_horizontals() {
        let mut board = GameBoard::new();
        assert!(board.make_move(add(2, 3, 0)).success());
        let moves = generate_moves(&board, &[]);
        let horizontal_at = |x: u8| {
            moves
                .iter()
                .any(|mv| mv.placement.is_horizontal() && mv.anchor.x == x)
        };
        assert!(!horizontal_at(2));
        assert!(!horizontal_at(3));
        assert!(horizontal_at(4));
        assert!(moves.contains(&add(2, 3, 2)));
    }

    #[test]
    fn test_nearly_full_column_takes_horizontals_only() {
        let mut board = GameBoard::new();
        for y in (0..10).step_by(2) {
            assert!(board.make_move(add(2, 0, y)).success());
            assert!(board.make_move(add(2, 1, y)).success());
        }
        assert!(board.make_move(add(1, 0, 10)).success());
        // Columns A and B are at height 11: one row left, room only for a flat card
        let moves = generate_moves(&board, &[]);
        let at_a: Vec<_> = moves.iter().filter(|mv| mv.anchor.x == 0).collect();
        assert_eq!(at_a.len(), 4);
        assert!(at_a.iter().all(|mv| mv.placement.is_horizontal() && mv.anchor.y == 11));
        assert!(!moves.iter().any(|mv| mv.anchor.x == 1));
    }

    #[test]
    fn test_forecast_changes_skyline() {
        let board = GameBoard::new();
        let moves = generate_moves(&board, &[add(2, 0, 0)]);
        assert!(moves.contains(&add(4, 0, 2)));
        assert!(!moves.contains(&add(4, 0, 0)));
        assert!(board.is_empty(Cell::new(0, 0)));
    }

    #[test]
    fn test_tree_shape() {
        let board = GameBoard::new();
        let leaf = possible_moves(&board, &[], 1);
        assert!(matches!(leaf, MoveTree::Leaf(_)));
        assert_eq!(leaf.len(), 60);
        assert_eq!(possible_moves(&board, &[], 0), leaf);

        let tree = possible_moves(&board, &[], 2);
        let MoveTree::Node(children) = &tree else {
            panic!("expected node");
        };
        assert_eq!(children.len(), 60);
        assert_eq!(tree.moves(), leaf.moves());
        for (mv, replies) in children {
            assert!(matches!(replies, MoveTree::Leaf(_)));
            assert_eq!(replies.moves(), generate_moves(&board, &[*mv]));
        }
        assert!(tree.leaf_count() > 60 * 50);
    }
}
