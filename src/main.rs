use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::info;
use snake_arcade::app::App;
use snake_arcade::config::{Difficulty, GameConfig, GameMode};
use snake_arcade::input::{GameInput, InputHandler};
use snake_arcade::renderer;
use snake_arcade::score::{ScorePersistence, ScoreStore, app_data_dir};
use snake_arcade::terminal_runtime::{TerminalSession, restore_terminal};

/// Longest the loop blocks on input when no tick is scheduled.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Difficulty preselected on the start screen.
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Game mode preselected on the start screen.
    #[arg(long, value_enum, default_value_t = GameMode::Normal)]
    mode: GameMode,

    /// High score file; defaults to the per-user data directory.
    #[arg(long = "scores-file")]
    scores_file: Option<PathBuf>,

    /// Log file; defaults to the per-user data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| app_data_dir().join("snake-arcade.log"));
    if let Err(error) = snake_arcade::logging(&log_path) {
        eprintln!("Logging disabled, cannot open {}: {error}", log_path.display());
    }

    let store = cli
        .scores_file
        .clone()
        .map_or_else(ScoreStore::at_default_path, ScoreStore::new);
    info!("high scores at {}", store.path().display());
    let mut app = App::new(store, GameConfig::new(cli.difficulty, cli.mode));

    install_panic_hook();

    let mut session = TerminalSession::enter()?;
    let result = run(&mut session, &mut app);
    drop(session);

    app.shutdown();
    info!("exiting");
    result
}

fn run<S: ScorePersistence>(session: &mut TerminalSession, app: &mut App<S>) -> io::Result<()> {
    let mut input = InputHandler::new();

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, app))?;

        let now = Instant::now();
        let timeout = app
            .time_until_tick(now)
            .map_or(IDLE_POLL_INTERVAL, |wait| wait.min(IDLE_POLL_INTERVAL));

        if let Some(game_input) = input.poll_input(timeout)? {
            if game_input == GameInput::Quit {
                break;
            }
            app.handle_input(game_input, Instant::now());
        }

        app.update(Instant::now());
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
