//! Board representation for Double Card

pub mod game_board;
pub mod grid;
pub mod moves;
pub mod placement;


// Re-exports
pub use game_board::GameBoard;
pub use grid::Grid;
pub use moves::{Move, MoveKind, ParseMoveError};
pub use placement::Placement;

/// Number of columns (A-H)
pub const WIDTH: usize = 8;
/// Number of rows (1-12)
pub const HEIGHT: usize = 12;
/// Cards available before the recycling phase starts
pub const MAX_CARDS: usize = 24;
/// Committed moves after which the game is a draw
pub const MAX_MOVES: usize = 60;

/// Color half of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Empty,
    Red,
    White,
}

/// Fill half of a tile (the "dot")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    Empty,
    Full,
    Open,
}

/// Contents of one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub color: Color,
    pub fill: Fill,
}

impl Tile {
    pub const EMPTY: Tile = Tile::new(Color::Empty, Fill::Empty);
    pub const RED_FULL: Tile = Tile::new(Color::Red, Fill::Full);
    pub const RED_OPEN: Tile = Tile::new(Color::Red, Fill::Open);
    pub const WHITE_FULL: Tile = Tile::new(Color::White, Fill::Full);
    pub const WHITE_OPEN: Tile = Tile::new(Color::White, Fill::Open);

    #[inline]
    pub const fn new(color: Color, fill: Fill) -> Self {
        Self { color, fill }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Tile::EMPTY
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::EMPTY
    }
}

/// Position on the board, `x` is the column and `y` the row (0 = floor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    #[inline]
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!((x as usize) < WIDTH && (y as usize) < HEIGHT);
        Self { x, y }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32) -> bool {
        x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32
    }

    /// Cell shifted by `(dx, dy)`, `None` when it falls off the board
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Cell> {
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;
        Cell::is_valid(x, y).then(|| Cell::new(x as u8, y as u8))
    }

    #[inline]
    pub fn above(self) -> Option<Cell> {
        self.offset(0, 1)
    }

    #[inline]
    pub fn below(self) -> Option<Cell> {
        self.offset(0, -1)
    }

    /// Column letter used by the move notation
    #[inline]
    pub fn column_letter(self) -> char {
        (b'A' + self.x) as char
    }
}

/// Read access to tiles, implemented by the real grid and by forecast overlays.
///
/// Win detection and both evaluators are written against this trait so they
/// can look at speculative positions without copying the board.
pub trait TileView {
    fn tile(&self, cell: Cell) -> Tile;

    #[inline]
    fn is_empty(&self, cell: Cell) -> bool {
        self.tile(cell).is_empty()
    }

    /// Lowest empty row of column `x`, `HEIGHT` when the column is full
    fn column_height(&self, x: u8) -> usize {
        (0..HEIGHT)
            .find(|&y| self.is_empty(Cell::new(x, y as u8)))
            .unwrap_or(HEIGHT)
    }
}
