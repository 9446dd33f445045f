use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, GameConfig, GameMode};
use crate::error::ScoreError;

const APP_DIR_NAME: &str = "snake-arcade";
const SCORE_FILE_NAME: &str = "high_scores.json";

/// Identifies one high-score slot: a difficulty and mode combination.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct HighScoreKey {
    pub difficulty: Difficulty,
    pub mode: GameMode,
}

impl From<GameConfig> for HighScoreKey {
    fn from(config: GameConfig) -> Self {
        Self {
            difficulty: config.difficulty,
            mode: config.mode,
        }
    }
}

impl fmt::Display for HighScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.difficulty, self.mode)
    }
}

/// Best score per difficulty/mode, stored as `{"easy-normal": 12, ...}`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    scores: BTreeMap<String, u32>,
}

impl HighScoreTable {
    /// Best score for `key`, zero when none was recorded.
    #[must_use]
    pub fn get(&self, key: HighScoreKey) -> u32 {
        self.scores.get(&key.to_string()).copied().unwrap_or(0)
    }

    /// Records `score` if it beats the stored value. Returns true on a new record.
    pub fn record(&mut self, key: HighScoreKey, score: u32) -> bool {
        if score <= self.get(key) {
            return false;
        }
        self.scores.insert(key.to_string(), score);
        true
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Where the high-score table lives between sessions.
///
/// Neither operation fails outward: unreadable data loads as an empty table and
/// failed writes are logged and dropped.
pub trait ScorePersistence {
    fn load(&self) -> HighScoreTable;
    fn save(&self, table: &HighScoreTable);
}

/// JSON file backed [`ScorePersistence`].
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct default location.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScorePersistence for ScoreStore {
    fn load(&self) -> HighScoreTable {
        match load_table_from_path(&self.path) {
            Ok(table) => table,
            Err(error) => {
                warn!(
                    "ignoring high scores at {}: {error}",
                    self.path.display()
                );
                HighScoreTable::default()
            }
        }
    }

    fn save(&self, table: &HighScoreTable) {
        match save_table_to_path(&self.path, table) {
            Ok(()) => debug!("high scores saved to {}", self.path.display()),
            Err(error) => warn!(
                "failed to save high scores to {}: {error}",
                self.path.display()
            ),
        }
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = app_data_dir();
    base.push(SCORE_FILE_NAME);
    base
}

/// Per-user data directory for this game, falling back to the working directory.
#[must_use]
pub fn app_data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

fn load_table_from_path(path: &Path) -> Result<HighScoreTable, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HighScoreTable::default()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

fn save_table_to_path(path: &Path, table: &HighScoreTable) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json)?;
    Ok(())
}
