//! Text game loop for two players over any reader and writer
//!
//! Players alternate turns until a line is completed, the move limit forces a
//! draw, or a computer player fails to produce a legal move (which forfeits).
//! Humans type moves in the notation of [`crate::board::moves`] and are asked
//! again whenever the input does not parse or the board rejects it.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::{info, warn};

use crate::board::{GameBoard, Move, ParseMoveError};
use crate::engine::{AIEngine, EngineConfig};
use crate::rules::{Verdict, WinCondition};
use crate::trace::{TraceError, TraceWriter};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("input closed while waiting for {0}")]
    InputClosed(String),
    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Who decides a player's moves
#[derive(Debug, Clone)]
pub enum Controller {
    Human,
    Computer(AIEngine),
}

/// One side of the game
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub condition: WinCondition,
    pub controller: Controller,
}

impl Player {
    pub fn human(name: impl Into<String>, condition: WinCondition) -> Self {
        Self {
            name: name.into(),
            condition,
            controller: Controller::Human,
        }
    }

    pub fn computer(name: impl Into<String>, condition: WinCondition, config: EngineConfig) -> Self {
        Self {
            name: name.into(),
            condition,
            controller: Controller::Computer(AIEngine::with_config(condition, config)),
        }
    }

    #[inline]
    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }
}

/// How a finished game ended; player indices are 0 or 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A completed line for the winner's family
    Win { winner: usize, verdict: Verdict },
    /// The loser could not produce a legal move
    Forfeit { winner: usize },
    /// Neither family claims the final verdict
    Draw { verdict: Verdict },
}

impl Outcome {
    pub fn winner(&self) -> Option<usize> {
        match self {
            Outcome::Win { winner, .. } | Outcome::Forfeit { winner } => Some(*winner),
            Outcome::Draw { .. } => None,
        }
    }
}

/// Winner of a finished board, given each side's family and who moved last.
///
/// The mover is checked first, so completing both families at once wins.
pub fn attribute(verdict: Verdict, conditions: [WinCondition; 2], mover: usize) -> Outcome {
    let other = 1 - mover;
    if conditions[mover].claims(&verdict) {
        Outcome::Win { winner: mover, verdict }
    } else if conditions[other].claims(&verdict) {
        Outcome::Win { winner: other, verdict }
    } else {
        Outcome::Draw { verdict }
    }
}

enum Turn {
    Played,
    Forfeited,
}

/// Game between two players on one board
pub struct Session<R, W> {
    board: GameBoard,
    players: [Player; 2],
    input: R,
    output: W,
    trace: Option<TraceWriter<Box<dyn Write + Send>>>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// `players[0]` moves first
    pub fn new(players: [Player; 2], input: R, output: W) -> Self {
        Self {
            board: GameBoard::new(),
            players,
            input,
            output,
            trace: None,
        }
    }

    /// Record every computer decision
    pub fn with_trace(mut self, trace: TraceWriter<Box<dyn Write + Send>>) -> Self {
        self.trace = Some(trace);
        self
    }

    #[inline]
    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    /// Play until the game ends
    pub fn run(&mut self) -> Result<Outcome, SessionError> {
        writeln!(self.output, "Welcome to the Double Card game!")?;
        let mut mover = 0;
        loop {
            if let Turn::Forfeited = self.take_turn(mover)? {
                let outcome = Outcome::Forfeit { winner: 1 - mover };
                self.announce(&outcome)?;
                return Ok(outcome);
            }
            writeln!(self.output, "{}", self.board)?;

            if let Some(verdict) = self.board.is_winning_board() {
                let conditions = [self.players[0].condition, self.players[1].condition];
                let outcome = attribute(verdict, conditions, mover);
                self.announce(&outcome)?;
                return Ok(outcome);
            }
            mover = 1 - mover;
        }
    }

    fn take_turn(&mut self, idx: usize) -> Result<Turn, SessionError> {
        let engine = match &self.players[idx].controller {
            Controller::Human => None,
            Controller::Computer(engine) => Some(engine.clone()),
        };
        match engine {
            None => {
                self.human_turn(idx)?;
                Ok(Turn::Played)
            }
            Some(engine) => self.computer_turn(idx, &engine),
        }
    }

    fn human_turn(&mut self, idx: usize) -> Result<(), SessionError> {
        loop {
            let mv = self.prompt_move(idx)?;
            let verdict = self.board.make_move(mv);
            if verdict.success() {
                return Ok(());
            }
            let reasons: Vec<String> = verdict.failed().map(|c| format!("{c}:false")).collect();
            writeln!(
                self.output,
                "Move not legal, please enter a different move. (reasons: {})",
                reasons.join(", ")
            )?;
        }
    }

    /// Read lines until one parses as a move
    fn prompt_move(&mut self, idx: usize) -> Result<Move, SessionError> {
        let name = self.players[idx].name.clone();
        loop {
            write!(self.output, "({name}) Enter next move: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SessionError::InputClosed(name));
            }
            match line.trim().parse::<Move>() {
                Ok(mv) => return Ok(mv),
                Err(ParseMoveError::Empty) => continue,
                Err(err) => writeln!(
                    self.output,
                    "Invalid format ({err}), expecting \"0 <1-8> <A-H> <1-12>\" or \
                     \"<A-H> <1-12> <A-H> <1-12> <1-8> <A-H> <1-12>\""
                )?,
            }
        }
    }

    fn computer_turn(&mut self, idx: usize, engine: &AIEngine) -> Result<Turn, SessionError> {
        match engine.make_move(&mut self.board) {
            Ok(result) => {
                if let Some(trace) = self.trace.as_mut() {
                    trace.record(&result)?;
                }
                let path: Vec<String> = result.path.iter().map(Move::to_string).collect();
                writeln!(
                    self.output,
                    "Found path: [{}] with e={}",
                    path.join(", "),
                    result.score
                )?;
                writeln!(self.output, "Computer move: {}", result.best_move)?;
                Ok(Turn::Played)
            }
            Err(err) => {
                warn!(player = %self.players[idx].name, %err, "computer forfeits");
                writeln!(
                    self.output,
                    "Failed to get valid move for player {}: {err}",
                    idx + 1
                )?;
                Ok(Turn::Forfeited)
            }
        }
    }

    fn announce(&mut self, outcome: &Outcome) -> Result<(), SessionError> {
        match outcome {
            Outcome::Win { winner, .. } | Outcome::Forfeit { winner } => {
                info!(winner = winner + 1, moves = self.board.num_moves(), "game over");
                writeln!(self.output, "Player {} has won the game!", winner + 1)?;
            }
            Outcome::Draw { verdict } => {
                info!(moves = self.board.num_moves(), "game drawn");
                writeln!(
                    self.output,
                    "Game is a tie! ({})",
                    verdict.detail().unwrap_or("draw")
                )?;
            }
        }
        Ok(())
    }
}
