//! Theme constants for the Double Card GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(46, 84, 62); // Felt green
pub const GRID_LINE: Color32 = Color32::from_rgb(30, 58, 42);
pub const LABEL: Color32 = Color32::from_rgb(200, 215, 205);

// Tile faces
pub const RED_TILE: Color32 = Color32::from_rgb(200, 45, 50);
pub const WHITE_TILE: Color32 = Color32::from_rgb(245, 244, 238);
pub const DOT_ON_RED: Color32 = Color32::from_rgb(250, 235, 235);
pub const DOT_ON_WHITE: Color32 = Color32::from_rgb(35, 35, 40);
pub const CARD_OUTLINE: Color32 = Color32::from_rgb(20, 20, 24);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(255, 200, 40);
pub const SELECTED_CARD: Color32 = Color32::from_rgb(80, 170, 255);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Functions for colors that can't be const
pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 90)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 100)
}

// Panel text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 30.0;
pub const TILE_INSET: f32 = 2.0;
pub const DOT_RADIUS_RATIO: f32 = 0.22;
pub const CARD_OUTLINE_WIDTH: f32 = 2.5;
pub const MARKER_WIDTH: f32 = 3.0;
