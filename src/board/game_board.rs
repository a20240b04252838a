//! Game board with card registry and move legality

use std::fmt;

use tracing::{debug, instrument};

use super::grid::Grid;
use super::{Cell, Move, Tile, TileView, MAX_CARDS};
use crate::rules::{self, Condition, Verdict, WinningLine};
use crate::search::{self, MoveTree};

/// Grid as it would look with one card lifted off
struct Lifted<'a> {
    grid: &'a Grid,
    lifted: Option<[Cell; 2]>,
}

impl TileView for Lifted<'_> {
    #[inline]
    fn tile(&self, cell: Cell) -> Tile {
        match self.lifted {
            Some(cells) if cells.contains(&cell) => Tile::EMPTY,
            _ => self.grid.get(cell),
        }
    }
}

#[inline]
fn within_bounds(mv: &Move) -> bool {
    Cell::is_valid(mv.anchor.x as i32, mv.anchor.y as i32) && mv.cells().is_some()
}

/// Anchor on the floor, or resting on tiles under every bottom half
fn has_support<V: TileView + ?Sized>(view: &V, mv: &Move) -> bool {
    let rests_on = |cell: Cell| cell.below().is_some_and(|below| !view.is_empty(below));
    if mv.anchor.y == 0 {
        return true;
    }
    if !rests_on(mv.anchor) {
        return false;
    }
    !mv.placement.is_horizontal() || mv.partner().is_some_and(rests_on)
}

fn space_available<V: TileView + ?Sized>(view: &V, mv: &Move) -> bool {
    mv.cells()
        .is_some_and(|cells| cells.iter().all(|&cell| view.is_empty(cell)))
}

/// Cells directly above a card; off-board cells are left out
pub(crate) fn cells_above(card: &Move) -> impl Iterator<Item = Cell> {
    let cells = card.cells();
    let tops: [Option<Cell>; 2] = match cells {
        Some([anchor, partner]) if card.placement.is_horizontal() => {
            [anchor.above(), partner.above()]
        }
        Some([_, partner]) => [partner.above(), None],
        None => [None, None],
    };
    tops.into_iter().flatten()
}

/// Double Card board state.
///
/// Owns the grid, the registry of cards on the board, the committed move
/// counter and the last applied move. Mutated only through [`GameBoard::make_move`].
#[derive(Debug, Clone, Default)]
pub struct GameBoard {
    grid: Grid,
    /// Cards currently on the board, in commit order
    placed: Vec<Move>,
    num_moves: usize,
    last_moved: Option<Move>,
}

impl GameBoard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cards on the board in commit order; the last entry is the last moved card
    #[inline]
    pub fn placed_cards(&self) -> &[Move] {
        &self.placed
    }

    /// Committed moves so far (adds and recycles)
    #[inline]
    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    #[inline]
    pub fn last_moved(&self) -> Option<&Move> {
        self.last_moved.as_ref()
    }

    /// True once every card is on the board and turns become recycles
    #[inline]
    pub fn is_recycle_phase(&self) -> bool {
        self.num_moves >= MAX_CARDS
    }

    /// Registry entry covering exactly `cells` (anchor first)
    pub fn find_card(&self, cells: [Cell; 2]) -> Option<&Move> {
        self.placed.iter().find(|card| card.occupies(cells))
    }

    /// Registry entry covering `cell`, whichever half it is
    pub fn card_at(&self, cell: Cell) -> Option<&Move> {
        self.placed
            .iter()
            .find(|card| card.cells().is_some_and(|cells| cells.contains(&cell)))
    }

    /// Nothing rests on top of `card`
    pub fn can_remove(&self, card: &Move) -> bool {
        cells_above(card).all(|cell| self.grid.get(cell).is_empty())
    }

    /// Legality of an add; no state is touched
    pub fn verify_add(&self, mv: &Move) -> Verdict {
        let bounds = within_bounds(mv);
        Verdict::all([
            (Condition::WithinBounds, bounds),
            (Condition::HasSupport, bounds && has_support(&self.grid, mv)),
            (Condition::SpaceAvailable, bounds && space_available(&self.grid, mv)),
            (Condition::CardsLeft, self.num_moves < MAX_CARDS),
        ])
    }

    /// Legality of a recycle; no state is touched.
    ///
    /// Support and space are judged with the old card already lifted, so a
    /// card may be put back on its own cells as long as the placement changes.
    pub fn verify_recycle(&self, mv: &Move) -> Verdict {
        let from = mv.old_positions();
        let found = from.and_then(|cells| self.find_card(cells));
        let lifted = Lifted {
            grid: &self.grid,
            lifted: found.and(from),
        };

        let bounds = within_bounds(mv);
        let unchanged = found.is_some_and(|card| {
            card.anchor == mv.anchor && card.placement == mv.placement
        });
        let different_than_last = match (self.last_moved, from) {
            (Some(last), Some(cells)) => !last.occupies(cells),
            _ => true,
        };

        Verdict::all([
            (Condition::WithinBounds, bounds),
            (Condition::HasSupport, bounds && has_support(&lifted, mv)),
            (
                Condition::SpaceAvailable,
                bounds && !unchanged && space_available(&lifted, mv),
            ),
            (Condition::AllCardsPlaced, self.num_moves >= MAX_CARDS),
            (Condition::CardExists, found.is_some()),
            (Condition::CanRemove, found.is_some_and(|card| self.can_remove(card))),
            (Condition::DifferentThanLast, different_than_last),
        ])
    }

    /// Dispatch on move kind
    pub fn verify(&self, mv: &Move) -> Verdict {
        if mv.is_recycle() {
            self.verify_recycle(mv)
        } else {
            self.verify_add(mv)
        }
    }

    /// Apply a move if it is legal. The returned verdict says which checks failed otherwise.
    #[instrument(level = "debug", skip(self, mv), fields(mv = %mv))]
    pub fn make_move(&mut self, mv: Move) -> Verdict {
        let verdict = self.verify(&mv);
        if !verdict.success() {
            debug!(%verdict, "move rejected");
            return verdict;
        }

        if let Some(from) = mv.old_positions() {
            self.lift(from);
        }
        if let Some(writes) = mv.writes() {
            for (cell, tile) in writes {
                self.grid.set(cell, tile);
            }
        }
        self.placed.push(mv);
        self.num_moves += 1;
        self.last_moved = Some(mv);
        debug!(num_moves = self.num_moves, "move applied");
        verdict
    }

    /// Remove a registered card and clear its cells
    fn lift(&mut self, cells: [Cell; 2]) {
        if let Some(idx) = self.placed.iter().position(|card| card.occupies(cells)) {
            self.placed.remove(idx);
            for cell in cells {
                self.grid.clear(cell);
            }
        }
    }

    /// Move-limit draw, else a line win (`red`/`white`/`full`/`open`), else `None` while play continues
    pub fn is_winning_board(&self) -> Option<Verdict> {
        rules::check_outcome(&self.grid, self.num_moves)
    }

    /// The first winning run with its cells, for highlighting
    pub fn winning_line(&self) -> Option<WinningLine> {
        rules::find_winning_line(&self.grid)
    }

    /// Legal continuations after the forecasted moves, `depth` plies deep
    pub fn possible_moves(&self, forecast: &[Move], depth: usize) -> MoveTree {
        search::possible_moves(self, forecast, depth)
    }
}

impl TileView for GameBoard {
    #[inline]
    fn tile(&self, cell: Cell) -> Tile {
        self.grid.get(cell)
    }
}

impl fmt::Display for GameBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}
