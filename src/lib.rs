use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::fmt::Formatter;

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod gesture;
pub mod hazards;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

/// Routes `log` records into `path`, appending.
///
/// The terminal is owned by the game screen, so records never go to stderr.
/// Filtering follows `RUST_LOG` and defaults to `info`.
pub fn logging(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(logging_format)
        .try_init();
    Ok(())
}

fn logging_format(buf: &mut Formatter, record: &log::Record) -> io::Result<()> {
    writeln!(
        buf,
        "[{:5} {}:{}] {}",
        record.level(),
        record.file().unwrap_or_default(),
        record.line().unwrap_or_default(),
        record.args()
    )
}
