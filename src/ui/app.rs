//! Main application for the Double Card GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use crate::board::{Cell, Color, Fill, Placement, Tile, MAX_CARDS, MAX_MOVES};
use crate::engine::EngineConfig;
use crate::rules::WinCondition;
use crate::session::Outcome;

use super::board_view::{BoardView, Highlights};
use super::game_state::{GameMode, GameResult, GameState};
use super::theme::*;

/// Main Double Card application
pub struct DoubleCardApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl DoubleCardApp {
    /// Create the app with the starting mode and engine settings
    pub fn new(_cc: &eframe::CreationContext<'_>, mode: GameMode, config: EngineConfig) -> Self {
        Self {
            state: GameState::new(mode, config),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }

    fn new_game(&mut self, mode: GameMode) {
        self.state = GameState::new(mode, *self.state.config());
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    for (label, mode) in [
                        (
                            "New Game (PvE - Colors, first)",
                            GameMode::PvE {
                                human: WinCondition::Colors,
                                human_first: true,
                            },
                        ),
                        (
                            "New Game (PvE - Dots, second)",
                            GameMode::PvE {
                                human: WinCondition::Dots,
                                human_first: false,
                            },
                        ),
                        (
                            "New Game (PvP)",
                            GameMode::PvP {
                                first: WinCondition::Colors,
                            },
                        ),
                    ] {
                        if ui.button(label).clicked() {
                            self.new_game(mode);
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human, .. } => format!("PvE - You: {human}"),
                        GameMode::PvP { .. } => "PvP - Hotseat".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_placement_card(ui);
                ui.add_space(10.0);

                self.render_progress_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game_over.clone() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("DOUBLE CARD").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new("Four in a row: colors or dots")
                    .size(11.0)
                    .color(TEXT_MUTED),
            );
        });
    }

    /// Swatch and status of the player on turn
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let condition = self.state.current_condition();
            let accent = match condition {
                WinCondition::Colors => RED_TILE,
                WinCondition::Dots => WHITE_TILE,
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().rect_filled(rect.shrink(4.0), CornerRadius::same(6), accent);
                if condition == WinCondition::Dots {
                    ui.painter().circle_filled(rect.center(), 9.0, DOT_ON_WHITE);
                }

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    let title = format!("Player {} - {}", self.state.current + 1, condition);
                    ui.label(RichText::new(title).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.game_over.is_some() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.board.is_recycle_phase() {
                        if self.state.recycle_from.is_some() {
                            ("Click the destination", TIMER_NORMAL)
                        } else {
                            ("Pick a card to recycle", TIMER_NORMAL)
                        }
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 1.0 {
                    TIMER_NORMAL
                } else if secs < 3.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Placement picker for the next card
    fn render_placement_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("PLACEMENT (1-8)").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal_wrapped(|ui| {
                for placement in Placement::ALL {
                    let (left, right) = placement.tiles();
                    let text = format!("{} {}{}", placement.id(), glyph(left), glyph(right));
                    let selected = self.state.placement == placement;
                    if ui.selectable_label(selected, text).clicked() {
                        self.state.placement = placement;
                    }
                }
            });

            ui.add_space(4.0);
            let orientation = if self.state.placement.is_horizontal() {
                "horizontal"
            } else {
                "vertical"
            };
            ui.label(RichText::new(orientation).size(10.0).color(TEXT_SECONDARY));
        });
    }

    /// Cards left and moves until the draw
    fn render_progress_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let moves = self.state.board.num_moves();
            let cards_left = MAX_CARDS.saturating_sub(moves);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("Move #{moves}/{MAX_MOVES}"))
                        .size(11.0)
                        .color(TEXT_SECONDARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let text = if cards_left == 0 {
                        RichText::new("Recycling").size(11.0).strong().color(TIMER_WARNING)
                    } else {
                        RichText::new(format!("{cards_left} cards left"))
                            .size(11.0)
                            .color(TEXT_SECONDARY)
                    };
                    ui.label(text);
                });
            });
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{:?}", self.state.config().heuristic))
                                .size(11.0)
                                .strong()
                                .color(TIMER_NORMAL),
                        );
                        ui.label(
                            RichText::new(format!("Score: {}", result.score))
                                .size(10.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(format!("{}ms", result.time_ms))
                                    .size(10.0)
                                    .color(TEXT_SECONDARY),
                            );
                            ui.label(
                                RichText::new(format!("{} evals", result.num_evals))
                                    .size(10.0)
                                    .color(TEXT_MUTED),
                            );
                        });
                    });
                });

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("-> {}", result.best_move))
                        .size(12.0)
                        .strong()
                        .color(WIN_HIGHLIGHT),
                );
                if result.path.len() > 1 {
                    let line: Vec<String> = result.path.iter().map(ToString::to_string).collect();
                    ui.label(RichText::new(line.join(" / ")).size(10.0).color(TEXT_MUTED));
                }
                ui.label(
                    RichText::new(format!("{} root moves", result.second_ply.len()))
                        .size(10.0)
                        .color(TEXT_MUTED),
                );
            });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let (headline, detail) = match (&result.outcome, result.winner) {
            (Outcome::Win { winner, verdict }, Some(condition)) => {
                let held: Vec<&'static str> = verdict.held().map(Into::into).collect();
                (
                    format!("Player {} ({condition}) wins!", winner + 1),
                    format!("by {}", held.join(", ")),
                )
            }
            (Outcome::Forfeit { winner }, _) => (
                format!("Player {} wins!", winner + 1),
                "opponent had no legal move".to_string(),
            ),
            _ => ("Game is a tie!".to_string(), format!("{MAX_MOVES} moves played")),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("GAME OVER")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(180, 255, 180)),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(4.0);
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);

                    if ui.button(RichText::new("New Game").size(14.0).strong()).clicked() {
                        self.state.reset();
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let winning_cells = self
                .state
                .game_over
                .as_ref()
                .and_then(|r| r.winning_line.as_ref())
                .map(|line| line.cells);
            let accept_input = self.state.game_over.is_none()
                && self.state.is_human_turn()
                && !self.state.is_ai_thinking();

            let state = &self.state;
            let preview = |cell: Cell| state.preview_move(cell);
            let highlights = Highlights {
                selected: state.recycle_from,
                winning_cells: winning_cells.as_ref().map(|cells| cells.as_slice()),
                preview: Some(&preview),
            };
            let clicked = self
                .board_view
                .show(ui, &state.board, highlights, accept_input);

            if let Some(cell) = clicked {
                if let Err(msg) = self.state.click_cell(cell) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        const PLACEMENT_KEYS: [egui::Key; 8] = [
            egui::Key::Num1,
            egui::Key::Num2,
            egui::Key::Num3,
            egui::Key::Num4,
            egui::Key::Num5,
            egui::Key::Num6,
            egui::Key::Num7,
            egui::Key::Num8,
        ];

        ctx.input(|i| {
            for (key, placement) in PLACEMENT_KEYS.into_iter().zip(Placement::ALL) {
                if i.key_pressed(key) {
                    self.state.placement = placement;
                }
            }

            // D - Toggle debug panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // Escape - Put the picked-up card back
            if i.key_pressed(egui::Key::Escape) {
                self.state.cancel_selection();
            }

            // N - New game
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

/// Text glyph for one tile in the placement picker
fn glyph(tile: Tile) -> &'static str {
    match (tile.color, tile.fill) {
        (Color::Red, Fill::Full) => "R\u{25CF}",
        (Color::Red, _) => "R\u{25CB}",
        (_, Fill::Full) => "W\u{25CF}",
        _ => "W\u{25CB}",
    }
}

impl eframe::App for DoubleCardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && self.state.game_over.is_none() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Keep the timers ticking
        if self.state.is_ai_thinking() || self.state.game_over.is_none() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
