//! Double Card front ends
//!
//! `double_card` opens the GUI; `double_card play` runs the text game on the
//! terminal.

use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use double_card::engine::DEFAULT_DEPTH;
use double_card::session::{Player, Session};
use double_card::trace::TraceWriter;
use double_card::ui::{DoubleCardApp, GameMode};
use double_card::{EngineConfig, Heuristic, WinCondition};

#[derive(Parser)]
#[command(name = "double_card", about = "Double Card with a minimax opponent")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the graphical board (default)
    Gui(GuiArgs),
    /// Play in the terminal
    Play(PlayArgs),
}

/// Search settings shared by both front ends
#[derive(Args, Clone, Copy)]
struct EngineArgs {
    /// Plies to search
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,
    /// Leaf evaluator: naive or informed
    #[arg(long, default_value_t = Heuristic::Informed)]
    heuristic: Heuristic,
    /// Search root moves in parallel
    #[arg(long)]
    parallel: bool,
}

impl Default for EngineArgs {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            depth: config.depth,
            heuristic: config.heuristic,
            parallel: config.parallel,
        }
    }
}

impl From<EngineArgs> for EngineConfig {
    fn from(args: EngineArgs) -> Self {
        EngineConfig {
            depth: args.depth,
            heuristic: args.heuristic,
            parallel: args.parallel,
        }
    }
}

#[derive(Args)]
struct GuiArgs {
    /// Two humans share the board
    #[arg(long)]
    pvp: bool,
    /// Family the human plays: colors or dots
    #[arg(long, default_value_t = WinCondition::Colors)]
    human: WinCondition,
    /// Let the AI move first
    #[arg(long)]
    ai_first: bool,
    #[command(flatten)]
    engine: EngineArgs,
}

impl Default for GuiArgs {
    fn default() -> Self {
        Self {
            pvp: false,
            human: WinCondition::Colors,
            ai_first: false,
            engine: EngineArgs::default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    Human,
    Computer,
}

#[derive(Args)]
struct PlayArgs {
    /// Who plays first
    #[arg(long, value_enum, default_value_t = Side::Human)]
    player_one: Side,
    /// Who plays second
    #[arg(long, value_enum, default_value_t = Side::Computer)]
    player_two: Side,
    /// Family of player one; player two takes the other
    #[arg(long, default_value_t = WinCondition::Colors)]
    family: WinCondition,
    /// Write one record per AI move to this file
    #[arg(long)]
    trace: Option<PathBuf>,
    #[command(flatten)]
    engine: EngineArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they stay out of the text game
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match cli.cmd {
        None => run_gui(GuiArgs::default()),
        Some(Command::Gui(args)) => run_gui(args),
        Some(Command::Play(args)) => run_play(args),
    }
}

fn run_gui(args: GuiArgs) -> Result<()> {
    let mode = if args.pvp {
        GameMode::PvP { first: args.human }
    } else {
        GameMode::PvE {
            human: args.human,
            human_first: !args.ai_first,
        }
    };
    let config = EngineConfig::from(args.engine);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 820.0])
            .with_min_inner_size([640.0, 560.0])
            .with_title("Double Card"),
        ..Default::default()
    };

    eframe::run_native(
        "Double Card",
        options,
        Box::new(move |cc| Ok(Box::new(DoubleCardApp::new(cc, mode, config)))),
    )
    .map_err(|e| anyhow!("GUI failed: {e}"))
}

fn run_play(args: PlayArgs) -> Result<()> {
    let config = EngineConfig::from(args.engine);
    let make_player = |side: Side, name: &str, condition: WinCondition| match side {
        Side::Human => Player::human(name, condition),
        Side::Computer => Player::computer(name, condition, config),
    };
    let players = [
        make_player(args.player_one, "P1", args.family),
        make_player(args.player_two, "P2", args.family.opponent()),
    ];

    let stdin = io::stdin();
    let mut session = Session::new(players, stdin.lock(), io::stdout());
    if let Some(path) = &args.trace {
        let trace = TraceWriter::create(path)
            .with_context(|| format!("opening trace file {}", path.display()))?;
        session = session.with_trace(trace.boxed());
    }

    let outcome = session.run()?;
    info!(winner = ?outcome.winner().map(|w| w + 1), "session finished");
    Ok(())
}
