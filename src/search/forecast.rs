//! Overlay of hypothetical moves on top of a real board
//!
//! Lookahead never copies or mutates the board. A [`Forecast`] records the
//! tiles a sequence of moves would write and answers tile queries from that
//! record first, then from the board.

use std::collections::HashMap;

use crate::board::{Cell, GameBoard, Move, Tile, TileView};

/// Board view with a path of moves applied on top
#[derive(Debug, Clone)]
pub struct Forecast<'a> {
    board: &'a GameBoard,
    changes: HashMap<Cell, Tile>,
}

impl<'a> Forecast<'a> {
    /// Overlay for `path` applied in order; later moves win over earlier ones
    pub fn new(board: &'a GameBoard, path: &[Move]) -> Self {
        let mut forecast = Self {
            board,
            changes: HashMap::with_capacity(path.len() * 4),
        };
        for mv in path {
            forecast.apply(mv);
        }
        forecast
    }

    /// Record a move: a recycle blanks its old cells before writing
    pub fn apply(&mut self, mv: &Move) {
        if let Some(from) = mv.old_positions() {
            self.blank(from);
        }
        if let Some(writes) = mv.writes() {
            self.changes.extend(writes);
        }
    }

    /// Clear cells, as if the card covering them were picked up
    pub fn blank(&mut self, cells: [Cell; 2]) {
        for cell in cells {
            self.changes.insert(cell, Tile::EMPTY);
        }
    }

    /// Copy of this overlay with `cells` blanked
    pub fn lifted(&self, cells: [Cell; 2]) -> Forecast<'a> {
        let mut view = self.clone();
        view.blank(cells);
        view
    }

    #[inline]
    pub fn board(&self) -> &'a GameBoard {
        self.board
    }

    /// Number of overlaid cells
    #[inline]
    pub fn touched(&self) -> usize {
        self.changes.len()
    }
}

impl TileView for Forecast<'_> {
    #[inline]
    fn tile(&self, cell: Cell) -> Tile {
        self.changes
            .get(&cell)
            .copied()
            .unwrap_or_else(|| self.board.tile(cell))
    }
}

/// Registry the board would hold after `path`: recycles drop their old card,
/// every move is appended
pub fn forecast_registry(board: &GameBoard, path: &[Move]) -> Vec<Move> {
    let mut cards = board.placed_cards().to_vec();
    for mv in path {
        if let Some(from) = mv.old_positions() {
            if let Some(idx) = cards.iter().position(|card| card.occupies(from)) {
                cards.remove(idx);
            }
        }
        cards.push(*mv);
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Placement;

    fn add(id: u8, x: u8, y: u8) -> Move {
        Move::add(Placement::new(id).unwrap(), Cell::new(x, y))
    }

    #[test]
    fn test_empty_forecast_reads_board() {
        let mut board = GameBoard::new();
        assert!(board.make_move(add(1, 0, 0)).success());
        let view = Forecast::new(&board, &[]);
        assert_eq!(view.touched(), 0);
        assert_eq!(view.tile(Cell::new(0, 0)), Tile::RED_FULL);
        assert_eq!(view.tile(Cell::new(1, 0)), Tile::WHITE_OPEN);
        assert_eq!(view.column_height(0), 1);
    }

    #[test]
    fn test_forecast_does_not_touch_board() {
        let board = GameBoard::new();
        let view = Forecast::new(&board, &[add(4, 3, 0), add(2, 3, 2)]);
        assert_eq!(view.tile(Cell::new(3, 0)), Tile::RED_FULL);
        assert_eq!(view.tile(Cell::new(3, 3)), Tile::RED_FULL);
        assert_eq!(view.column_height(3), 4);
        assert_eq!(view.touched(), 4);
        assert!(board.is_empty(Cell::new(3, 0)));
    }

    #[test]
    fn test_recycle_blanks_then_writes() {
        let board = GameBoard::new();
        let first = add(1, 0, 0);
        // Same cells, flipped placement
        let flip = Move::recycle(
            [Cell::new(0, 0), Cell::new(1, 0)],
            Placement::new(7).unwrap(),
            Cell::new(0, 0),
        );
        let view = Forecast::new(&board, &[first, flip]);
        assert_eq!(view.tile(Cell::new(0, 0)), Tile::WHITE_FULL);
        assert_eq!(view.tile(Cell::new(1, 0)), Tile::RED_OPEN);

        // Standing it upright frees the right half
        let upright = Move::recycle(
            [Cell::new(0, 0), Cell::new(1, 0)],
            Placement::new(2).unwrap(),
            Cell::new(0, 0),
        );
        let view = Forecast::new(&board, &[first, upright]);
        assert!(view.is_empty(Cell::new(1, 0)));
        assert_eq!(view.tile(Cell::new(0, 1)), Tile::RED_FULL);
    }

    #[test]
    fn test_lifted_copy() {
        let board = GameBoard::new();
        let view = Forecast::new(&board, &[add(1, 2, 0)]);
        let lifted = view.lifted([Cell::new(2, 0), Cell::new(3, 0)]);
        assert!(lifted.is_empty(Cell::new(2, 0)));
        assert!(!view.is_empty(Cell::new(2, 0)));
    }

    #[test]
    fn test_registry_follows_recycles() {
        let mut board = GameBoard::new();
        let a = add(1, 0, 0);
        let b = add(1, 2, 0);
        assert!(board.make_move(a).success());
        assert!(board.make_move(b).success());
        let moved = Move::recycle(
            [Cell::new(0, 0), Cell::new(1, 0)],
            Placement::new(2).unwrap(),
            Cell::new(5, 0),
        );
        assert_eq!(forecast_registry(&board, &[moved]), vec![b, moved]);
        assert_eq!(forecast_registry(&board, &[]), vec![a, b]);
    }
}
