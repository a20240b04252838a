//! Board rendering for the Double Card GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use crate::board::{Cell, Color, Fill, GameBoard, Move, Tile, TileView, HEIGHT, WIDTH};

use super::theme::*;

/// What the board view should highlight this frame
#[derive(Clone, Copy, Default)]
pub struct Highlights<'a> {
    /// Card picked up for recycling
    pub selected: Option<[Cell; 2]>,
    /// Cells of the completed line
    pub winning_cells: Option<&'a [Cell]>,
    /// Move a click would make at the hovered cell
    pub preview: Option<&'a dyn Fn(Cell) -> Option<Move>>,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &GameBoard,
        highlights: Highlights<'_>,
        accept_input: bool,
    ) -> Option<Cell> {
        let available = ui.available_size();

        // Square cells, fitting the taller dimension
        let by_width = (available.x - 2.0 * BOARD_MARGIN) / WIDTH as f32;
        let by_height = (available.y - 2.0 * BOARD_MARGIN) / HEIGHT as f32;
        self.cell_size = by_width.min(by_height).max(8.0);

        let size = Vec2::new(
            self.cell_size * WIDTH as f32 + 2.0 * BOARD_MARGIN,
            self.cell_size * HEIGHT as f32 + 2.0 * BOARD_MARGIN,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_coordinates(&painter);
        self.draw_tiles(&painter, board);
        self.draw_cards(&painter, board);

        if let Some(last) = board.last_moved().and_then(Move::cells) {
            self.outline_card(&painter, last, LAST_MOVE_MARKER, MARKER_WIDTH);
        }
        if let Some(selected) = highlights.selected {
            self.outline_card(&painter, selected, SELECTED_CARD, MARKER_WIDTH + 1.0);
        }
        if let Some(cells) = highlights.winning_cells {
            self.draw_winning_line(&painter, cells);
        }

        if !accept_input {
            return None;
        }

        // Hover preview and click
        let cell = response.hover_pos().and_then(|p| self.screen_to_board(p))?;
        if let Some(mv) = highlights.preview.and_then(|preview| preview(cell)) {
            let is_valid = board.verify(&mv).success();
            self.draw_hover_preview(&painter, &mv, is_valid);
        }
        response.clicked().then_some(cell)
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(1.0, GRID_LINE);
        let origin = self.board_rect.min + Vec2::splat(BOARD_MARGIN);
        let width = self.cell_size * WIDTH as f32;
        let height = self.cell_size * HEIGHT as f32;

        for x in 0..=WIDTH {
            let dx = x as f32 * self.cell_size;
            painter.line_segment(
                [origin + Vec2::new(dx, 0.0), origin + Vec2::new(dx, height)],
                stroke,
            );
        }
        for y in 0..=HEIGHT {
            let dy = y as f32 * self.cell_size;
            painter.line_segment(
                [origin + Vec2::new(0.0, dy), origin + Vec2::new(width, dy)],
                stroke,
            );
        }
    }

    /// Column letters below the board, row numbers on the left
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(13.0);

        for x in 0..WIDTH {
            let letter = (b'A' + x as u8) as char;
            let center = self.cell_rect(Cell::new(x as u8, 0)).center_bottom();
            painter.text(
                center + Vec2::new(0.0, BOARD_MARGIN * 0.5),
                egui::Align2::CENTER_CENTER,
                letter,
                font.clone(),
                LABEL,
            );
        }

        for y in 0..HEIGHT {
            let center = self.cell_rect(Cell::new(0, y as u8)).left_center();
            painter.text(
                center - Vec2::new(BOARD_MARGIN * 0.5, 0.0),
                egui::Align2::CENTER_CENTER,
                format!("{}", y + 1),
                font.clone(),
                LABEL,
            );
        }
    }

    fn draw_tiles(&self, painter: &Painter, board: &GameBoard) {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let cell = Cell::new(x as u8, y as u8);
                let tile = board.tile(cell);
                if !tile.is_empty() {
                    self.draw_tile(painter, cell, tile, 255);
                }
            }
        }
    }

    /// Colored face with a filled or ringed dot
    fn draw_tile(&self, painter: &Painter, cell: Cell, tile: Tile, alpha: u8) {
        let rect = self.cell_rect(cell).shrink(TILE_INSET);
        let (face, dot) = match tile.color {
            Color::Red => (RED_TILE, DOT_ON_RED),
            Color::White => (WHITE_TILE, DOT_ON_WHITE),
            Color::Empty => return,
        };
        let face = with_alpha(face, alpha);
        let dot = with_alpha(dot, alpha);
        painter.rect_filled(rect, CornerRadius::same(3), face);

        let radius = self.cell_size * DOT_RADIUS_RATIO;
        match tile.fill {
            Fill::Full => {
                painter.circle_filled(rect.center(), radius, dot);
            }
            Fill::Open => {
                painter.circle_stroke(rect.center(), radius, Stroke::new(2.0, dot));
            }
            Fill::Empty => {}
        }
    }

    /// Outline each card so both halves read as one piece
    fn draw_cards(&self, painter: &Painter, board: &GameBoard) {
        for cells in board.placed_cards().iter().filter_map(Move::cells) {
            self.outline_card(painter, cells, CARD_OUTLINE, CARD_OUTLINE_WIDTH);
        }
    }

    fn outline_card(&self, painter: &Painter, cells: [Cell; 2], color: Color32, width: f32) {
        let rect = self
            .cell_rect(cells[0])
            .union(self.cell_rect(cells[1]))
            .shrink(TILE_INSET * 0.5);
        painter.rect_stroke(
            rect,
            CornerRadius::same(4),
            Stroke::new(width, color),
            StrokeKind::Inside,
        );
    }

    fn draw_winning_line(&self, painter: &Painter, cells: &[Cell]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);
        for pair in cells.windows(2) {
            painter.line_segment(
                [
                    self.cell_rect(pair[0]).center(),
                    self.cell_rect(pair[1]).center(),
                ],
                stroke,
            );
        }
        for &cell in cells {
            painter.rect_stroke(
                self.cell_rect(cell),
                CornerRadius::same(3),
                stroke,
                StrokeKind::Inside,
            );
        }
    }

    /// Ghost of the card a click would place
    fn draw_hover_preview(&self, painter: &Painter, mv: &Move, is_valid: bool) {
        let Some(writes) = mv.writes() else {
            // Partner off the board: mark the anchor only
            painter.rect_filled(
                self.cell_rect(mv.anchor),
                CornerRadius::same(3),
                hover_invalid(),
            );
            return;
        };

        for (cell, tile) in writes {
            self.draw_tile(painter, cell, tile, 110);
        }
        let color = if is_valid { hover_valid() } else { hover_invalid() };
        self.outline_card(painter, writes.map(|(cell, _)| cell), color, MARKER_WIDTH);
    }

    /// Screen rectangle of a cell; row 0 is drawn at the bottom
    fn cell_rect(&self, cell: Cell) -> Rect {
        let left = self.board_rect.min.x + BOARD_MARGIN + cell.x as f32 * self.cell_size;
        let top = self.board_rect.min.y
            + BOARD_MARGIN
            + (HEIGHT - 1 - cell.y as usize) as f32 * self.cell_size;
        Rect::from_min_size(Pos2::new(left, top), Vec2::splat(self.cell_size))
    }

    /// Convert screen coordinates to a board cell
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Cell> {
        let relative = screen_pos - self.board_rect.min - Vec2::splat(BOARD_MARGIN);
        let col = (relative.x / self.cell_size).floor() as i32;
        let row_from_top = (relative.y / self.cell_size).floor() as i32;
        let row = HEIGHT as i32 - 1 - row_from_top;

        Cell::is_valid(col, row).then(|| Cell::new(col as u8, row as u8))
    }
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
