use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use grid_snake::config::{
    DEFAULT_TILE_COUNT, FRAME_BUDGET_MS, GridSize, MAX_TILE_COUNT, MIN_TILE_COUNT,
};
use grid_snake::game::Phase;
use grid_snake::input::{GameInput, SwipeTracker, map_key};
use grid_snake::renderer::TerminalPresenter;
use grid_snake::score::{HighScoreStore, JsonScoreStore, NullScoreStore};
use grid_snake::session::Session;
use grid_snake::terminal_runtime::{TerminalSession, cleanup_terminal_best_effort};
use tracing::info;
use tracing_subscriber::EnvFilter;

type GameSession = Session<Box<dyn HighScoreStore>, TerminalPresenter>;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Tiles per side of the square play field.
    #[arg(
        long = "grid-size",
        default_value_t = DEFAULT_TILE_COUNT,
        value_parser = clap::value_parser!(u16).range(i64::from(MIN_TILE_COUNT)..=i64::from(MAX_TILE_COUNT))
    )]
    grid_size: u16,

    /// Do not read or write the high-score file.
    #[arg(long = "no-persist")]
    no_persist: bool,

    /// Use this file for the high score instead of the platform data dir.
    #[arg(long = "scores-file", conflicts_with = "no_persist")]
    scores_file: Option<PathBuf>,

    /// Write diagnostics to this file; filter with RUST_LOG.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    install_panic_hook();

    run(cli)
}

fn run(cli: Cli) -> io::Result<()> {
    let store: Box<dyn HighScoreStore> = match (cli.no_persist, cli.scores_file) {
        (true, _) => Box::new(NullScoreStore),
        (false, Some(path)) => Box::new(JsonScoreStore::new(path)),
        (false, None) => Box::new(JsonScoreStore::default_location()),
    };

    let presenter = TerminalPresenter::new(TerminalSession::enter()?);
    let mut session = Session::new(GridSize::square(cli.grid_size), store, presenter, cli.seed)?;
    let mut swipe = SwipeTracker::new();
    let frame_budget = Duration::from_millis(FRAME_BUDGET_MS);

    info!(grid_size = cli.grid_size, "terminal session ready");

    loop {
        let wait = session
            .next_wakeup(Instant::now())
            .map_or(frame_budget, |until_tick| until_tick.min(frame_budget));

        if event::poll(wait)? {
            let flow = match event::read()? {
                Event::Key(key) => match map_key(key) {
                    Some(input) => handle_input(&mut session, input)?,
                    None => Flow::Continue,
                },
                Event::Mouse(mouse) => {
                    // Swipes only steer a live snake.
                    if session.state().phase == Phase::Running {
                        if let Some(direction) = swipe.observe(mouse) {
                            session.request_direction(direction);
                        }
                    } else {
                        swipe.cancel();
                    }
                    Flow::Continue
                }
                Event::Resize(..) => {
                    session.present()?;
                    Flow::Continue
                }
                _ => Flow::Continue,
            };

            if flow == Flow::Quit {
                break;
            }
        }

        session.tick(Instant::now())?;
    }

    info!(
        score = session.state().score,
        high_score = session.state().high_score,
        "quit"
    );
    Ok(())
}

fn handle_input(session: &mut GameSession, input: GameInput) -> io::Result<Flow> {
    match input {
        GameInput::Direction(direction) => session.request_direction(direction),
        GameInput::PauseToggle => session.request_pause_toggle(Instant::now())?,
        GameInput::Start => session.start(Instant::now())?,
        GameInput::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
