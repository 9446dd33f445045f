use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns raw mode, the alternate screen and mouse capture for one run.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Switches the terminal into game mode and creates a ratatui terminal.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide) {
            let _ = restore_terminal();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Leaves game mode. Safe to call more than once, including from a panic hook.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, DisableMouseCapture, Show, LeaveAlternateScreen)
}
