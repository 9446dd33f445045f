use std::io;

use thiserror::Error;

/// Failure to find a free cell for a new entity.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum PlacementError {
    #[error("no free cell left on the {width}x{height} grid")]
    GridSaturated { width: u16, height: u16 },
}

/// Failure reading or writing the high-score file.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
