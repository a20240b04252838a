//! Weight tables and run counting for Double Card evaluation
//!
//! Positive scores favour the color player, negative scores the dot player.

use crate::board::{Color, Fill, Tile};
use crate::rules::RUN_TO_WIN;

/// Naive per-tile weights: White is rewarded, Red penalised
pub struct NaiveWeight;

impl NaiveWeight {
    pub const RED_FULL: f64 = -2.0;
    pub const RED_OPEN: f64 = -1.5;
    pub const WHITE_FULL: f64 = 3.0;
    pub const WHITE_OPEN: f64 = 1.0;
}

/// Weight for a tile in the naive evaluator; empty tiles weigh nothing
#[inline]
pub fn naive_weight(tile: Tile) -> f64 {
    match (tile.color, tile.fill) {
        (Color::Red, Fill::Full) => NaiveWeight::RED_FULL,
        (Color::Red, Fill::Open) => NaiveWeight::RED_OPEN,
        (Color::White, Fill::Full) => NaiveWeight::WHITE_FULL,
        (Color::White, Fill::Open) => NaiveWeight::WHITE_OPEN,
        _ => 0.0,
    }
}

/// Window weight by run length 0..=4. A full run is a win and weighs infinity.
pub const RUN_WEIGHTS: [f64; RUN_TO_WIN + 1] = [0.0, 1.0, 10.0, 100.0, f64::INFINITY];

/// Tiles of one attribute family in a window, or 0 once two values clash.
///
/// Empty cells are skipped, so `R _ R R` counts 3.
fn family_run<T: PartialEq + Copy>(values: impl Iterator<Item = T>, empty: T) -> usize {
    let mut seen = None;
    let mut count = 0;
    for value in values.filter(|&v| v != empty) {
        match seen {
            None => seen = Some(value),
            Some(first) if first != value => return 0,
            Some(_) => {}
        }
        count += 1;
    }
    count
}

/// (color run, fill run) of a four-tile window
#[inline]
pub fn window_runs(window: &[Tile; RUN_TO_WIN]) -> (usize, usize) {
    (
        family_run(window.iter().map(|t| t.color), Color::Empty),
        family_run(window.iter().map(|t| t.fill), Fill::Empty),
    )
}

/// Contribution of one window: color progress minus fill progress
#[inline]
pub fn window_score(window: &[Tile; RUN_TO_WIN]) -> f64 {
    let (color, fill) = window_runs(window);
    RUN_WEIGHTS[color] - RUN_WEIGHTS[fill]
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Tile = Tile::EMPTY;
    const RF: Tile = Tile::RED_FULL;
    const RO: Tile = Tile::RED_OPEN;
    const WO: Tile = Tile::WHITE_OPEN;

    #[test]
    fn test_run_weight_hierarchy() {
        assert!(RUN_WEIGHTS.windows(2).all(|w| w[0] < w[1]));
        assert!(RUN_WEIGHTS[RUN_TO_WIN].is_infinite());
    }

    #[test]
    fn test_winning_windows() {
        assert_eq!(window_runs(&[RF, RF, RF, RF]), (4, 4));
        assert_eq!(window_runs(&[RF, RF, RO, RF]), (4, 0));
    }

    #[test]
    fn test_triples_ignore_gaps() {
        assert_eq!(window_runs(&[RF, RF, E, RF]), (3, 3));
        assert_eq!(window_runs(&[RF, RF, RF, E]), (3, 3));
    }

    #[test]
    fn test_doubles() {
        assert_eq!(window_runs(&[WO, WO, E, E]), (2, 2));
        assert_eq!(window_runs(&[WO, E, E, WO]), (2, 2));
    }

    #[test]
    fn test_clash_zeroes_the_family() {
        assert_eq!(window_runs(&[RF, WO, RF, RF]), (0, 0));
        assert_eq!(window_runs(&[RO, WO, E, E]), (0, 2));
        assert_eq!(window_runs(&[E, E, E, E]), (0, 0));
    }

    #[test]
    fn test_window_score() {
        assert_eq!(window_score(&[E, E, E, E]), 0.0);
        assert_eq!(window_score(&[RO, WO, E, E]), -10.0);
        assert_eq!(window_score(&[RF, RO, RF, RO]), f64::INFINITY);
        assert!(window_score(&[RF, RF, RF, RF]).is_nan());
    }

    #[test]
    fn test_naive_weights() {
        assert_eq!(naive_weight(Tile::WHITE_FULL), 3.0);
        assert_eq!(naive_weight(Tile::RED_OPEN), -1.5);
        assert_eq!(naive_weight(E), 0.0);
    }
}
