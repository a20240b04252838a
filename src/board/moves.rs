//! Moves and their text notation
//!
//! ```text
//! Add:     0 <placement> <col> <row>                  e.g. "0 4 C 1"
//! Recycle: <col> <row> <col> <row> <placement> <col> <row>
//!                                                     e.g. "C 1 C 2 5 A 1"
//! ```
//!
//! Columns are letters `A`-`H`, rows are 1-based on the wire and 0-based inside.

use std::fmt;
use std::str::FromStr;

use super::{Cell, Placement, Tile, HEIGHT, WIDTH};

/// Whether a move puts a new card down or relocates an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Add,
    /// Lift the card occupying `from` (anchor cell first) and place it anew
    Recycle { from: [Cell; 2] },
}

/// A single turn: card placement at an anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub placement: Placement,
    pub anchor: Cell,
}

impl Move {
    #[inline]
    pub fn add(placement: Placement, anchor: Cell) -> Self {
        Self {
            kind: MoveKind::Add,
            placement,
            anchor,
        }
    }

    #[inline]
    pub fn recycle(from: [Cell; 2], placement: Placement, anchor: Cell) -> Self {
        Self {
            kind: MoveKind::Recycle { from },
            placement,
            anchor,
        }
    }

    #[inline]
    pub fn is_recycle(&self) -> bool {
        matches!(self.kind, MoveKind::Recycle { .. })
    }

    /// Cells of the card being lifted, `None` for an add
    #[inline]
    pub fn old_positions(&self) -> Option<[Cell; 2]> {
        match self.kind {
            MoveKind::Add => None,
            MoveKind::Recycle { from } => Some(from),
        }
    }

    /// Second cell covered by the new card
    #[inline]
    pub fn partner(&self) -> Option<Cell> {
        self.placement.partner(self.anchor)
    }

    /// Both cells covered by the new card, `None` if it sticks out of the board
    #[inline]
    pub fn cells(&self) -> Option<[Cell; 2]> {
        self.partner().map(|partner| [self.anchor, partner])
    }

    /// Tiles this move writes, paired with their cells
    pub fn writes(&self) -> Option<[(Cell, Tile); 2]> {
        let [a, b] = self.cells()?;
        let (ta, tb) = self.placement.tiles();
        Some([(a, ta), (b, tb)])
    }

    /// True when this card covers exactly `cells`, anchor first
    #[inline]
    pub fn occupies(&self, cells: [Cell; 2]) -> bool {
        self.cells() == Some(cells)
    }
}

/// Reasons a move string is rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("empty move")]
    Empty,
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid placement '{0}', expecting 1-8")]
    Placement(String),
    #[error("invalid column '{0}', expecting A-H")]
    Column(String),
    #[error("invalid row '{0}', expecting 1-12")]
    Row(String),
}

fn parse_placement(token: &str) -> Result<Placement, ParseMoveError> {
    token
        .parse::<u8>()
        .ok()
        .and_then(Placement::new)
        .ok_or_else(|| ParseMoveError::Placement(token.to_string()))
}

fn parse_cell(col: &str, row: &str) -> Result<Cell, ParseMoveError> {
    let x = match col.as_bytes() {
        [c] if c.to_ascii_uppercase().wrapping_sub(b'A') < WIDTH as u8 => {
            c.to_ascii_uppercase() - b'A'
        }
        _ => return Err(ParseMoveError::Column(col.to_string())),
    };
    let y = row
        .parse::<u8>()
        .ok()
        .filter(|y| (1..=HEIGHT as u8).contains(y))
        .ok_or_else(|| ParseMoveError::Row(row.to_string()))?;
    Ok(Cell::new(x, y - 1))
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        match fields.as_slice() {
            [] => Err(ParseMoveError::Empty),
            ["0", placement, col, row] => {
                Ok(Move::add(parse_placement(placement)?, parse_cell(col, row)?))
            }
            ["0", ..] => Err(ParseMoveError::FieldCount {
                expected: 4,
                found: fields.len(),
            }),
            [c1, r1, c2, r2, placement, col, row] => Ok(Move::recycle(
                [parse_cell(c1, r1)?, parse_cell(c2, r2)?],
                parse_placement(placement)?,
                parse_cell(col, row)?,
            )),
            _ => Err(ParseMoveError::FieldCount {
                expected: 7,
                found: fields.len(),
            }),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = self.anchor.column_letter();
        let row = self.anchor.y + 1;
        match self.kind {
            MoveKind::Add => write!(f, "0 {} {} {}", self.placement.id(), col, row),
            MoveKind::Recycle { from: [a, b] } => write!(
                f,
                "{} {} {} {} {} {} {}",
                a.column_letter(),
                a.y + 1,
                b.column_letter(),
                b.y + 1,
                self.placement.id(),
                col,
                row
            ),
        }
    }
}
