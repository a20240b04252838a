//! Game state management for the Double Card GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::board::{Cell, GameBoard, Move, Placement};
use crate::engine::{AIEngine, EngineConfig, EngineError, MoveResult};
use crate::rules::{WinCondition, WinningLine};
use crate::session::{attribute, Outcome};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE {
        human: WinCondition,
        human_first: bool,
    },
    /// Player vs Player (hotseat)
    PvP { first: WinCondition },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human: WinCondition::Colors,
            human_first: true,
        }
    }
}

impl GameMode {
    /// Family of the player who moves first
    pub fn first_condition(self) -> WinCondition {
        match self {
            GameMode::PvE { human, human_first } if human_first => human,
            GameMode::PvE { human, .. } => human.opponent(),
            GameMode::PvP { first } => first,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Result<MoveResult, EngineError>>,
        start_time: Instant,
    },
}

/// Finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    /// Family of the winner, `None` for a draw
    pub winner: Option<WinCondition>,
    pub winning_line: Option<WinningLine>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: GameBoard,
    pub mode: GameMode,
    /// Index of the player on turn; player 0 moves first
    pub current: usize,
    pub game_over: Option<GameResult>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    /// Placement used for the next human move
    pub placement: Placement,
    /// Card picked up for a recycle, waiting for its destination
    pub recycle_from: Option<[Cell; 2]>,
    pub message: Option<String>,

    config: EngineConfig,
}

impl GameState {
    pub fn new(mode: GameMode, config: EngineConfig) -> Self {
        Self {
            board: GameBoard::new(),
            mode,
            current: 0,
            game_over: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            placement: Placement::ALL[0],
            recycle_from: None,
            message: None,
            config,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.mode, self.config);
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Families by player index
    pub fn conditions(&self) -> [WinCondition; 2] {
        let first = self.mode.first_condition();
        [first, first.opponent()]
    }

    /// Family of the player on turn
    pub fn current_condition(&self) -> WinCondition {
        self.conditions()[self.current]
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human, .. } => self.current_condition() == human,
            GameMode::PvP { .. } => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        !self.is_human_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    fn check_can_play(&self) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        Ok(())
    }

    /// Human click on a board cell.
    ///
    /// While cards remain the cell is the anchor of a new card. Afterwards the
    /// first click picks up a card and the second one sets it down.
    pub fn click_cell(&mut self, cell: Cell) -> Result<(), String> {
        self.check_can_play()?;

        if !self.board.is_recycle_phase() {
            return self.try_play(Move::add(self.placement, cell));
        }

        match self.recycle_from {
            None => {
                let card = self
                    .board
                    .card_at(cell)
                    .ok_or_else(|| "No card there to recycle".to_string())?;
                let cells = card
                    .cells()
                    .ok_or_else(|| "Card is off the board".to_string())?;
                if !self.board.can_remove(card) {
                    return Err("That card is covered".to_string());
                }
                self.recycle_from = Some(cells);
                self.message = None;
                Ok(())
            }
            Some(from) => self.try_play(Move::recycle(from, self.placement, cell)),
        }
    }

    /// Drop the card picked up for recycling
    pub fn cancel_selection(&mut self) {
        self.recycle_from = None;
    }

    /// Move the next click would make at `cell`, for hover previews
    pub fn preview_move(&self, cell: Cell) -> Option<Move> {
        if !self.board.is_recycle_phase() {
            return Some(Move::add(self.placement, cell));
        }
        self.recycle_from
            .map(|from| Move::recycle(from, self.placement, cell))
    }

    /// Apply a human move, reporting the failed conditions when illegal
    pub fn try_play(&mut self, mv: Move) -> Result<(), String> {
        self.check_can_play()?;
        let verdict = self.board.make_move(mv);
        if !verdict.success() {
            let failed: Vec<&'static str> = verdict.failed().map(Into::into).collect();
            return Err(format!("Move {mv} not legal: {}", failed.join(", ")));
        }
        self.finish_move();
        Ok(())
    }

    /// Bookkeeping after a move has been applied
    fn finish_move(&mut self) {
        let mover = self.current;
        self.recycle_from = None;
        self.message = None;
        self.move_timer.stop();

        if let Some(verdict) = self.board.is_winning_board() {
            let outcome = attribute(verdict, self.conditions(), mover);
            self.end_game(outcome);
            return;
        }

        self.current = 1 - mover;
        self.move_timer.start();
    }

    fn end_game(&mut self, outcome: Outcome) {
        let winner = outcome.winner().map(|idx| self.conditions()[idx]);
        info!(?winner, moves = self.board.num_moves(), "game over");
        self.game_over = Some(GameResult {
            winning_line: match outcome {
                Outcome::Win { .. } => self.board.winning_line(),
                _ => None,
            },
            outcome,
            winner,
        });
    }

    /// Start AI thinking
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }

        let board = self.board.clone();
        let engine = AIEngine::with_config(self.current_condition(), self.config);

        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&board);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let received = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((result, elapsed)) = received else {
            return;
        };
        self.ai_state = AiState::Idle;
        self.move_timer.set_ai_time(elapsed);

        match result {
            Ok(result) => {
                let verdict = self.board.make_move(result.best_move);
                if verdict.success() {
                    self.last_ai_result = Some(result);
                    self.finish_move();
                } else {
                    warn!(mv = %result.best_move, %verdict, "AI move rejected");
                    self.forfeit(format!("AI move {} rejected: {verdict}", result.best_move));
                }
            }
            Err(err) => {
                warn!(%err, "AI failed");
                self.forfeit(err.to_string());
            }
        }
    }

    /// Player on turn loses
    fn forfeit(&mut self, reason: String) {
        self.message = Some(reason);
        self.end_game(Outcome::Forfeit {
            winner: 1 - self.current,
        });
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TileView, MAX_CARDS};

    fn hotseat() -> GameState {
        GameState::new(
            GameMode::PvP {
                first: WinCondition::Colors,
            },
            EngineConfig::default(),
        )
    }

    fn place(state: &mut GameState, id: u8, x: u8, y: u8) {
        state.placement = Placement::new(id).unwrap();
        state.click_cell(Cell::new(x, y)).unwrap();
    }

    #[test]
    fn test_mode_sides() {
        let pve = GameState::new(
            GameMode::PvE {
                human: WinCondition::Dots,
                human_first: false,
            },
            EngineConfig::default(),
        );
        assert_eq!(pve.conditions(), [WinCondition::Colors, WinCondition::Dots]);
        assert!(pve.is_ai_turn());
        assert!(hotseat().is_human_turn());
    }

    #[test]
    fn test_click_places_card_and_passes_turn() {
        let mut state = hotseat();
        place(&mut state, 4, 0, 0);
        assert_eq!(state.board.num_moves(), 1);
        assert_eq!(state.current, 1);
        assert_eq!(state.current_condition(), WinCondition::Dots);
    }

    #[test]
    fn test_illegal_click_keeps_turn() {
        let mut state = hotseat();
        let err = state.click_cell(Cell::new(3, 4)).unwrap_err();
        assert!(err.contains("has_support"), "{err}");
        assert_eq!(state.current, 0);
        assert_eq!(state.board.num_moves(), 0);
    }

    #[test]
    fn test_row_win_ends_game() {
        let mut state = hotseat();
        place(&mut state, 4, 0, 0);
        place(&mut state, 2, 7, 0);
        place(&mut state, 8, 1, 0);
        place(&mut state, 2, 6, 0);
        place(&mut state, 4, 2, 0);
        place(&mut state, 2, 5, 0);
        place(&mut state, 8, 3, 0);
        let result = state.game_over.as_ref().unwrap();
        assert_eq!(result.winner, Some(WinCondition::Colors));
        assert!(result.winning_line.is_some());
        assert!(state.click_cell(Cell::new(4, 0)).is_err());
    }

    #[test]
    fn test_recycle_takes_two_clicks() {
        let mut state = hotseat();
        for (y, id) in [1, 5, 3, 7, 1, 5].into_iter().enumerate() {
            for x in [0, 2, 4, 6] {
                place(&mut state, id, x, y as u8);
            }
        }
        assert_eq!(state.board.num_moves(), MAX_CARDS);
        assert!(state.game_over.is_none());

        // Covered card cannot be picked up
        assert!(state.click_cell(Cell::new(0, 0)).is_err());
        assert!(state.recycle_from.is_none());

        state.click_cell(Cell::new(3, 5)).unwrap();
        assert_eq!(state.recycle_from, Some([Cell::new(2, 5), Cell::new(3, 5)]));
        state.placement = Placement::new(2).unwrap();
        state.click_cell(Cell::new(0, 6)).unwrap();
        assert!(state.recycle_from.is_none());
        assert_eq!(state.board.num_moves(), MAX_CARDS + 1);
        assert!(state.board.is_empty(Cell::new(2, 5)));
    }

    #[test]
    fn test_preview_follows_phase() {
        let mut state = hotseat();
        state.placement = Placement::new(3).unwrap();
        let preview = state.preview_move(Cell::new(1, 0)).unwrap();
        assert!(!preview.is_recycle());
        assert_eq!(preview.placement.id(), 3);
        state.cancel_selection();
        assert!(state.recycle_from.is_none());
    }
}
