//! The eight ways a card can be laid on the board
//!
//! Every card carries one Red and one White half. Odd placements lie
//! horizontally (second half to the right of the anchor), even placements
//! stand vertically (second half above the anchor).

use super::{Cell, Tile};

/// Tiles deposited by each placement: (anchor half, partner half).
/// Index 0 is placement 1.
const PLACEMENT_TILES: [(Tile, Tile); 8] = [
    (Tile::RED_FULL, Tile::WHITE_OPEN),  // 1: horizontal RF-WO
    (Tile::WHITE_OPEN, Tile::RED_FULL),  // 2: vertical, WO below RF
    (Tile::WHITE_OPEN, Tile::RED_FULL),  // 3: horizontal WO-RF
    (Tile::RED_FULL, Tile::WHITE_OPEN),  // 4: vertical, RF below WO
    (Tile::RED_OPEN, Tile::WHITE_FULL),  // 5: horizontal RO-WF
    (Tile::WHITE_FULL, Tile::RED_OPEN),  // 6: vertical, WF below RO
    (Tile::WHITE_FULL, Tile::RED_OPEN),  // 7: horizontal WF-RO
    (Tile::RED_OPEN, Tile::WHITE_FULL),  // 8: vertical, RO below WF
];

/// Placement identifier, always in `1..=8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement(u8);

impl Placement {
    pub const ALL: [Placement; 8] = [
        Placement(1),
        Placement(2),
        Placement(3),
        Placement(4),
        Placement(5),
        Placement(6),
        Placement(7),
        Placement(8),
    ];
    pub const VERTICAL: [Placement; 4] = [Placement(2), Placement(4), Placement(6), Placement(8)];
    pub const HORIZONTAL: [Placement; 4] =
        [Placement(1), Placement(3), Placement(5), Placement(7)];

    /// Returns `None` outside `1..=8`
    #[inline]
    pub fn new(id: u8) -> Option<Self> {
        (1..=8).contains(&id).then_some(Placement(id))
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        self.0 % 2 == 1
    }

    /// Offset of the partner half relative to the anchor
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        if self.is_horizontal() {
            (1, 0)
        } else {
            (0, 1)
        }
    }

    /// Partner cell for a card anchored at `anchor`, `None` if off the board
    #[inline]
    pub fn partner(self, anchor: Cell) -> Option<Cell> {
        let (dx, dy) = self.offset();
        anchor.offset(dx, dy)
    }

    /// Tiles written to (anchor, partner)
    #[inline]
    pub fn tiles(self) -> (Tile, Tile) {
        PLACEMENT_TILES[(self.0 - 1) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    #[test]
    fn test_placement_range() {
        assert!(Placement::new(0).is_none());
        assert!(Placement::new(9).is_none());
        for id in 1..=8 {
            assert_eq!(Placement::new(id).map(Placement::id), Some(id));
        }
    }

    #[test]
    fn test_orientation_by_parity() {
        assert!(Placement::HORIZONTAL.iter().all(|p| p.is_horizontal()));
        assert!(Placement::VERTICAL.iter().all(|p| !p.is_horizontal()));
    }

    #[test]
    fn test_every_card_has_one_red_and_one_white_half() {
        for p in Placement::ALL {
            let (a, b) = p.tiles();
            assert_ne!(a.color, b.color, "placement {}", p.id());
            assert_ne!(a.fill, b.fill, "placement {}", p.id());
            assert!(a.color != Color::Empty && b.color != Color::Empty);
        }
    }

    #[test]
    fn test_partner_cell() {
        let anchor = Cell::new(3, 4);
        assert_eq!(Placement::ALL[0].partner(anchor), Some(Cell::new(4, 4)));
        assert_eq!(Placement::ALL[1].partner(anchor), Some(Cell::new(3, 5)));
        // Horizontal card cannot hang off the right edge
        assert_eq!(Placement::ALL[0].partner(Cell::new(7, 0)), None);
        // Vertical card cannot poke through the ceiling
        assert_eq!(Placement::ALL[1].partner(Cell::new(0, 11)), None);
    }
}
