//! Fixed 8x12 tile grid

use std::fmt;

use super::{Cell, Color, Fill, Tile, TileView, HEIGHT, WIDTH};

/// Raw tile storage, indexed `[x][y]` with row 0 at the floor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Tile; HEIGHT]; WIDTH],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[Tile::EMPTY; HEIGHT]; WIDTH],
        }
    }

    /// Get tile at position
    #[inline]
    pub fn get(&self, cell: Cell) -> Tile {
        self.cells[cell.x as usize][cell.y as usize]
    }

    /// Write a tile (no rule checks, use `GameBoard::make_move` for game moves)
    #[inline]
    pub fn set(&mut self, cell: Cell, tile: Tile) {
        self.cells[cell.x as usize][cell.y as usize] = tile;
    }

    #[inline]
    pub fn clear(&mut self, cell: Cell) {
        self.set(cell, Tile::EMPTY);
    }

    /// Number of non-empty cells
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|tile| !tile.is_empty())
            .count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl TileView for Grid {
    #[inline]
    fn tile(&self, cell: Cell) -> Tile {
        self.get(cell)
    }
}

/// Two-character rendering of a tile: color tag then fill glyph
pub(crate) fn tile_glyphs(tile: Tile) -> (char, char) {
    let tag = match tile.color {
        Color::Red => 'R',
        Color::White => 'W',
        Color::Empty => ' ',
    };
    let dot = match tile.fill {
        Fill::Full => '•',
        Fill::Open => '◦',
        Fill::Empty => ' ',
    };
    (tag, dot)
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "--".repeat(WIDTH + 1);
        write!(f, "{rule}")?;
        for y in (0..HEIGHT).rev() {
            write!(f, "\n|")?;
            for x in 0..WIDTH {
                let (tag, dot) = tile_glyphs(self.cells[x][y]);
                write!(f, "{tag}{dot}")?;
            }
            write!(f, "|")?;
        }
        write!(f, "\n{rule}")
    }
}
