use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Number of cells along each edge of the square play field.
pub const TILE_COUNT: u16 = 30;

/// Cell the snake head occupies when a game starts.
pub const START_POSITION: (i32, i32) = (10, 10);

/// Obstacles generated for a game in [`GameMode::Obstacles`].
pub const OBSTACLE_COUNT: usize = 5;

/// Random samples tried before falling back to scanning for free cells.
pub const MAX_RANDOM_PLACEMENT_ATTEMPTS: usize = 256;

/// Presses released faster than this are treated as a pause tap.
pub const TAP_THRESHOLD: Duration = Duration::from_millis(300);

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// The fixed 30×30 field used by every game.
    pub const STANDARD: Self = Self {
        width: TILE_COUNT,
        height: TILE_COUNT,
    };
}

/// Selects the simulation tick interval.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Time between two simulation ticks.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(150),
            Self::Medium => Duration::from_millis(100),
            Self::Hard => Duration::from_millis(70),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    #[must_use]
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gameplay variant: plain walls, walls plus obstacles, or a wrapping field with portals.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Normal,
    Obstacles,
    Portal,
}

impl GameMode {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Obstacles, Self::Portal];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Obstacles => "obstacles",
            Self::Portal => "portal",
        }
    }

    /// Returns true when leaving the field wraps around instead of hitting a wall.
    #[must_use]
    pub fn wraps(self) -> bool {
        self == Self::Portal
    }

    #[must_use]
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    #[must_use]
    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let index = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(index + step) % all.len()]
}

/// Settings chosen on the start screen, fixed for the duration of one game.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub mode: GameMode,
}

impl GameConfig {
    #[must_use]
    pub fn new(difficulty: Difficulty, mode: GameMode) -> Self {
        Self { difficulty, mode }
    }

    #[must_use]
    pub fn tick_interval(self) -> Duration {
        self.difficulty.tick_interval()
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    /// Snake segments cycle through these by index.
    pub snake: [Color; 3],
    /// Food flickers between these each frame.
    pub food: [Color; 3],
    pub obstacle: Color,
    /// One color per portal of the pair.
    pub portals: [Color; 2],
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    snake: [
        Color::Rgb(0x27, 0xae, 0x60),
        Color::Rgb(0x2e, 0xcc, 0x71),
        Color::Rgb(0x1a, 0xbc, 0x9c),
    ],
    food: [
        Color::Rgb(0xe7, 0x4c, 0x3c),
        Color::Rgb(0xc0, 0x39, 0x2b),
        Color::Rgb(0xd3, 0x54, 0x00),
    ],
    obstacle: Color::Rgb(0x7f, 0x8c, 0x8d),
    portals: [Color::Rgb(0x8e, 0x44, 0xad), Color::Rgb(0x9b, 0x59, 0xb6)],
    play_bg: Color::Rgb(0x34, 0x49, 0x5e),
    border_fg: Color::Rgb(0x2c, 0x3e, 0x50),
    hud_score: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Rgb(0x2e, 0xcc, 0x71),
    menu_footer: Color::DarkGray,
};

/// Each logical cell is drawn this many terminal columns wide.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_CELL: &str = "██";
pub const GLYPH_FOOD: &str = "()";
pub const GLYPH_PORTAL: &str = "<>";
