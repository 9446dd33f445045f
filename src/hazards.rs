use log::warn;
use rand::Rng;

use crate::config::GridSize;
use crate::food::{Food, place_free_cell};
use crate::snake::{Position, Snake};

/// Fixed wall cells placed once per game in obstacles mode.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Obstacles {
    cells: Vec<Position>,
}

impl Obstacles {
    #[must_use]
    pub fn from_cells(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// Places up to `count` obstacles clear of the snake, the food and each other.
    ///
    /// Stops early, with a warning, if the grid runs out of free cells.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        food: &Food,
        count: usize,
    ) -> Self {
        let mut cells = Vec::with_capacity(count);

        while cells.len() < count {
            let placed = place_free_cell(rng, bounds, |cell| {
                snake.occupies(cell) || cell == food.position || cells.contains(&cell)
            });

            match placed {
                Ok(cell) => cells.push(cell),
                Err(error) => {
                    warn!("placed {} of {count} obstacles: {error}", cells.len());
                    break;
                }
            }
        }

        Self { cells }
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}

/// Linked pair of cells; entering either one exits through the other.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Portals {
    ends: [Position; 2],
}

impl Portals {
    #[must_use]
    pub fn new(first: Position, second: Position) -> Self {
        Self {
            ends: [first, second],
        }
    }

    /// Places a portal pair clear of the snake and the food.
    ///
    /// Returns `None`, with a warning, when the grid has no room for both ends.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        food: &Food,
    ) -> Option<Self> {
        let blocked = |cell: Position| snake.occupies(cell) || cell == food.position;

        let placed = place_free_cell(rng, bounds, blocked).and_then(|first| {
            place_free_cell(rng, bounds, |cell| blocked(cell) || cell == first)
                .map(|second| Self::new(first, second))
        });

        match placed {
            Ok(portals) => Some(portals),
            Err(error) => {
                warn!("portals skipped: {error}");
                None
            }
        }
    }

    /// Returns where a head landing on `position` comes out, if it is a portal.
    #[must_use]
    pub fn exit_for(&self, position: Position) -> Option<Position> {
        let [first, second] = self.ends;
        if position == first {
            Some(second)
        } else if position == second {
            Some(first)
        } else {
            None
        }
    }

    #[must_use]
    pub fn ends(&self) -> [Position; 2] {
        self.ends
    }
}
