use log::debug;
use rand::Rng;

use crate::config::{GridSize, MAX_RANDOM_PLACEMENT_ATTEMPTS};
use crate::error::PlacementError;
use crate::hazards::Obstacles;
use crate::snake::{Position, Snake};

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        1
    }

    /// Spawns food on a cell free of the snake and any obstacle.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        obstacles: &Obstacles,
    ) -> Result<Self, PlacementError> {
        place_free_cell(rng, bounds, |cell| {
            snake.occupies(cell) || obstacles.contains(cell)
        })
        .map(Self::new)
    }
}

/// Picks a uniformly random cell for which `is_blocked` returns false.
///
/// Rejection sampling is tried first since the field is usually sparse. After
/// [`MAX_RANDOM_PLACEMENT_ATTEMPTS`] misses the free cells are enumerated and
/// one is drawn from them, so the call always terminates and only fails when
/// no free cell exists at all.
pub fn place_free_cell<R, F>(
    rng: &mut R,
    bounds: GridSize,
    is_blocked: F,
) -> Result<Position, PlacementError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let width = i32::from(bounds.width);
    let height = i32::from(bounds.height);
    if width == 0 || height == 0 {
        return Err(saturated(bounds));
    }

    for _ in 0..MAX_RANDOM_PLACEMENT_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if !is_blocked(candidate) {
            return Ok(candidate);
        }
    }

    debug!("random placement missed {MAX_RANDOM_PLACEMENT_ATTEMPTS} times, scanning free cells");

    let candidates: Vec<Position> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
        .filter(|cell| !is_blocked(*cell))
        .collect();

    if candidates.is_empty() {
        return Err(saturated(bounds));
    }

    Ok(candidates[rng.gen_range(0..candidates.len())])
}

fn saturated(bounds: GridSize) -> PlacementError {
    PlacementError::GridSaturated {
        width: bounds.width,
        height: bounds.height,
    }
}
