//! Win and draw detection
//!
//! A player wins with four consecutive tiles of their family in one line:
//! - color players look for 4 Red or 4 White
//! - dot players look for 4 Full or 4 Open
//!
//! Lines are every row, column and diagonal of length 4 or more.

use strum::{Display, EnumString};

use crate::board::{Cell, Color, Fill, Tile, TileView, HEIGHT, MAX_MOVES, WIDTH};

use super::{Condition, Verdict};

/// Run length that wins the game
pub const RUN_TO_WIN: usize = 4;

/// Attribute family a player tries to line up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum WinCondition {
    /// Four Red or four White
    #[strum(to_string = "colors", serialize = "color")]
    Colors,
    /// Four Full or four Open
    #[strum(to_string = "dots", serialize = "dot", serialize = "fill")]
    Dots,
}

impl WinCondition {
    /// Verdict flags that count as a win for this family
    pub fn conditions(self) -> [Condition; 2] {
        match self {
            WinCondition::Colors => [Condition::Red, Condition::White],
            WinCondition::Dots => [Condition::Full, Condition::Open],
        }
    }

    #[inline]
    pub fn is_fill(self) -> bool {
        self == WinCondition::Dots
    }

    pub fn opponent(self) -> Self {
        match self {
            WinCondition::Colors => WinCondition::Dots,
            WinCondition::Dots => WinCondition::Colors,
        }
    }

    /// True if any of this family's flags holds in `verdict`
    pub fn claims(self, verdict: &Verdict) -> bool {
        self.conditions()
            .iter()
            .any(|&c| verdict.get(c) == Some(true))
    }
}

/// A straight line across the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: Cell,
    pub step: (i32, i32),
    pub len: usize,
}

impl Line {
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let (dx, dy) = self.step;
        (0..self.len as i32).filter_map(move |i| self.start.offset(dx * i, dy * i))
    }
}

/// Every scanned line in scan order: diagonals, rows, then columns
pub fn lines() -> Vec<Line> {
    let (w, h) = (WIDTH as i32, HEIGHT as i32);
    let min = RUN_TO_WIN as i32;
    let mut out = Vec::with_capacity(64);
    let mut push = |x: i32, y: i32, step: (i32, i32), len: i32| {
        if len >= min {
            out.push(Line {
                start: Cell::new(x as u8, y as u8),
                step,
                len: len as usize,
            });
        }
    };

    // Diagonal up-right, starting on the floor then on the left edge
    for x in 0..w {
        push(x, 0, (1, 1), (w - x).min(h));
    }
    for y in 1..h {
        push(0, y, (1, 1), w.min(h - y));
    }
    // Diagonal up-left, starting on the floor then on the right edge
    for x in (0..w).rev() {
        push(x, 0, (-1, 1), (x + 1).min(h));
    }
    for y in 1..h {
        push(w - 1, y, (-1, 1), w.min(h - y));
    }
    for y in 0..h {
        push(0, y, (1, 0), w);
    }
    for x in 0..w {
        push(x, 0, (0, 1), h);
    }
    out
}

/// Consecutive-tile counters for both families
#[derive(Debug, Default, Clone, Copy)]
struct RunCounter {
    red: usize,
    white: usize,
    full: usize,
    open: usize,
}

impl RunCounter {
    fn push(&mut self, tile: Tile) {
        match tile.color {
            Color::Red => {
                self.red += 1;
                self.white = 0;
            }
            Color::White => {
                self.red = 0;
                self.white += 1;
            }
            Color::Empty => {
                self.red = 0;
                self.white = 0;
            }
        }
        match tile.fill {
            Fill::Full => {
                self.full += 1;
                self.open = 0;
            }
            Fill::Open => {
                self.full = 0;
                self.open += 1;
            }
            Fill::Empty => {
                self.full = 0;
                self.open = 0;
            }
        }
    }

    fn verdict(&self) -> Verdict {
        Verdict::any([
            (Condition::Red, self.red == RUN_TO_WIN),
            (Condition::White, self.white == RUN_TO_WIN),
            (Condition::Full, self.full == RUN_TO_WIN),
            (Condition::Open, self.open == RUN_TO_WIN),
        ])
    }
}

/// First winning run found, with the four cells that form it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningLine {
    pub verdict: Verdict,
    pub cells: [Cell; RUN_TO_WIN],
}

/// Scan every line and return the first completed run
pub fn find_winning_line<V: TileView + ?Sized>(view: &V) -> Option<WinningLine> {
    for line in lines() {
        let mut counter = RunCounter::default();
        let mut recent = [line.start; RUN_TO_WIN];
        for (i, cell) in line.cells().enumerate() {
            counter.push(view.tile(cell));
            recent[i % RUN_TO_WIN] = cell;
            let verdict = counter.verdict();
            if verdict.success() {
                // `recent` is a ring buffer; rotate so the run reads in line order
                let mut cells = recent;
                cells.rotate_left((i + 1) % RUN_TO_WIN);
                return Some(WinningLine { verdict, cells });
            }
        }
    }
    None
}

/// Line win only
pub fn check_line_win<V: TileView + ?Sized>(view: &V) -> Option<Verdict> {
    find_winning_line(view).map(|line| line.verdict)
}

/// Full game outcome: a draw once the move limit is reached, else a line win
pub fn check_outcome<V: TileView + ?Sized>(view: &V, moves_made: usize) -> Option<Verdict> {
    if moves_made >= MAX_MOVES {
        return Some(Verdict::draw("number of moves"));
    }
    check_line_win(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;

    fn grid_with(tiles: &[((u8, u8), Tile)]) -> Grid {
        let mut grid = Grid::new();
        for &((x, y), tile) in tiles {
            grid.set(Cell::new(x, y), tile);
        }
        grid
    }

    #[test]
    fn test_line_coverage() {
        let all = lines();
        // 13 diagonals of length >= 4 each way, 12 rows, 8 columns
        let diagonals = all.iter().filter(|l| l.step.0 != 0 && l.step.1 != 0).count();
        assert_eq!(diagonals, 26);
        assert_eq!(all.iter().filter(|l| l.step == (1, 0)).count(), 12);
        assert_eq!(all.iter().filter(|l| l.step == (0, 1)).count(), 8);
        assert!(all.iter().all(|l| l.len >= RUN_TO_WIN));
        assert!(all.iter().all(|l| l.cells().count() == l.len));
    }

    #[test]
    fn test_every_length_four_window_is_on_some_line() {
        let all = lines();
        for &(dx, dy) in &[(1, 0), (0, 1), (1, 1), (-1, 1)] {
            for x in 0..WIDTH as i32 {
                for y in 0..HEIGHT as i32 {
                    if !Cell::is_valid(x + 3 * dx, y + 3 * dy) {
                        continue;
                    }
                    let start = Cell::new(x as u8, y as u8);
                    let end = start.offset(3 * dx, 3 * dy).unwrap();
                    assert!(
                        all.iter()
                            .filter(|l| l.step == (dx, dy))
                            .any(|l| l.cells().any(|c| c == start) && l.cells().any(|c| c == end)),
                        "window at ({x},{y}) step ({dx},{dy}) not covered"
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert!(check_line_win(&Grid::new()).is_none());
        assert!(check_outcome(&Grid::new(), 0).is_none());
    }

    #[test]
    fn test_vertical_red() {
        let grid = grid_with(&[
            ((0, 0), Tile::RED_FULL),
            ((0, 1), Tile::RED_OPEN),
            ((0, 2), Tile::RED_FULL),
            ((0, 3), Tile::RED_OPEN),
        ]);
        let win = find_winning_line(&grid).unwrap();
        assert_eq!(win.verdict.get(Condition::Red), Some(true));
        assert_eq!(win.verdict.get(Condition::Full), Some(false));
        assert_eq!(
            win.cells,
            [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 3)]
        );
    }

    #[test]
    fn test_horizontal_open() {
        let grid = grid_with(&[
            ((3, 0), Tile::RED_OPEN),
            ((4, 0), Tile::WHITE_OPEN),
            ((5, 0), Tile::RED_OPEN),
            ((6, 0), Tile::WHITE_OPEN),
        ]);
        let verdict = check_line_win(&grid).unwrap();
        assert_eq!(verdict.held().collect::<Vec<_>>(), vec![Condition::Open]);
    }

    #[test]
    fn test_diagonals_both_directions() {
        let up_right = grid_with(&[
            ((4, 8), Tile::WHITE_FULL),
            ((5, 9), Tile::WHITE_OPEN),
            ((6, 10), Tile::WHITE_FULL),
            ((7, 11), Tile::WHITE_OPEN),
        ]);
        assert_eq!(check_line_win(&up_right).unwrap().get(Condition::White), Some(true));

        let up_left = grid_with(&[
            ((3, 0), Tile::RED_FULL),
            ((2, 1), Tile::WHITE_FULL),
            ((1, 2), Tile::RED_FULL),
            ((0, 3), Tile::WHITE_FULL),
        ]);
        assert_eq!(check_line_win(&up_left).unwrap().get(Condition::Full), Some(true));
    }

    #[test]
    fn test_interrupted_run_is_not_a_win() {
        let grid = grid_with(&[
            ((0, 0), Tile::RED_FULL),
            ((1, 0), Tile::RED_FULL),
            ((2, 0), Tile::WHITE_OPEN),
            ((3, 0), Tile::RED_FULL),
            ((4, 0), Tile::RED_FULL),
        ]);
        assert!(check_line_win(&grid).is_none());
    }

    #[test]
    fn test_gap_breaks_run() {
        let grid = grid_with(&[
            ((0, 5), Tile::RED_FULL),
            ((1, 5), Tile::RED_FULL),
            ((3, 5), Tile::RED_FULL),
            ((4, 5), Tile::RED_FULL),
        ]);
        assert!(check_line_win(&grid).is_none());
    }

    #[test]
    fn test_draw_only_at_move_limit() {
        let grid = Grid::new();
        assert!(check_outcome(&grid, MAX_MOVES - 1).is_none());
        let draw = check_outcome(&grid, MAX_MOVES).unwrap();
        assert!(draw.is_draw());
        assert_eq!(draw.detail(), Some("number of moves"));
    }

    #[test]
    fn test_win_condition_claims() {
        let grid = grid_with(&[
            ((0, 0), Tile::RED_FULL),
            ((1, 0), Tile::RED_OPEN),
            ((2, 0), Tile::RED_FULL),
            ((3, 0), Tile::RED_OPEN),
        ]);
        let verdict = check_line_win(&grid).unwrap();
        assert!(WinCondition::Colors.claims(&verdict));
        assert!(!WinCondition::Dots.claims(&verdict));
        assert!(!WinCondition::Dots.claims(&Verdict::draw("number of moves")));
    }

    #[test]
    fn test_win_condition_names() {
        assert_eq!("Colors".parse::<WinCondition>().unwrap(), WinCondition::Colors);
        assert_eq!("fill".parse::<WinCondition>().unwrap(), WinCondition::Dots);
        assert_eq!(WinCondition::Dots.to_string(), "dots");
        assert_eq!(WinCondition::Colors.opponent(), WinCondition::Dots);
        assert!("stripes".parse::<WinCondition>().is_err());
    }

    #[test]
    fn test_move_limit_beats_line_win() {
        let grid = grid_with(&[
            ((0, 0), Tile::RED_FULL),
            ((1, 0), Tile::RED_OPEN),
            ((2, 0), Tile::RED_FULL),
            ((3, 0), Tile::RED_OPEN),
        ]);
        let verdict = check_outcome(&grid, MAX_MOVES).unwrap();
        assert!(verdict.is_draw());
        assert_eq!(verdict.get(Condition::Red), None);

        let verdict = check_outcome(&grid, MAX_MOVES - 1).unwrap();
        assert!(!verdict.is_draw());
        assert_eq!(verdict.get(Condition::Red), Some(true));
    }
}
