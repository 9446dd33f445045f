use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameConfig, GameMode, GridSize, OBSTACLE_COUNT, START_POSITION};
use crate::error::PlacementError;
use crate::food::Food;
use crate::hazards::{Obstacles, Portals};
use crate::input::{Direction, DirectionQueue, direction_change_is_valid, is_perpendicular};
use crate::snake::{Position, Snake};

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    ObstacleCollision,
    /// No free cell was left for the next food.
    BoardFull,
}

impl DeathReason {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::WallCollision => "hit the wall",
            Self::SelfCollision => "bit yourself",
            Self::ObstacleCollision => "hit an obstacle",
            Self::BoardFull => "no room left",
        }
    }
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct StepOutcome {
    /// Points gained this tick.
    pub score_delta: u32,
    /// Set when this tick ended the game.
    pub terminal: Option<DeathReason>,
}

/// All entity state for one game, from start to game over.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Food,
    pub obstacles: Obstacles,
    pub portals: Option<Portals>,
    pub score: u32,
    pub tick_count: u64,
    pub death_reason: Option<DeathReason>,
    config: GameConfig,
    bounds: GridSize,
    direction: Option<Direction>,
    turns: DirectionQueue,
    rng: StdRng,
}

impl GameSession {
    /// Sets up a fresh game on the standard field, seeded from entropy.
    pub fn new(config: GameConfig) -> Result<Self, PlacementError> {
        Self::with_rng(config, GridSize::STANDARD, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, PlacementError> {
        Self::with_rng(config, GridSize::STANDARD, StdRng::seed_from_u64(seed))
    }

    /// Places the snake, then food, then the mode's hazards, in that order.
    pub fn with_rng(
        config: GameConfig,
        bounds: GridSize,
        mut rng: StdRng,
    ) -> Result<Self, PlacementError> {
        let (x, y) = START_POSITION;
        let snake = Snake::new(Position::new(x, y));
        let food = Food::spawn(&mut rng, bounds, &snake, &Obstacles::default())?;

        let obstacles = match config.mode {
            GameMode::Obstacles => {
                Obstacles::generate(&mut rng, bounds, &snake, &food, OBSTACLE_COUNT)
            }
            _ => Obstacles::default(),
        };
        let portals = match config.mode {
            GameMode::Portal => Portals::generate(&mut rng, bounds, &snake, &food),
            _ => None,
        };

        Ok(Self {
            snake,
            food,
            obstacles,
            portals,
            score: 0,
            tick_count: 0,
            death_reason: None,
            config,
            bounds,
            direction: None,
            turns: DirectionQueue::default(),
            rng,
        })
    }

    /// Registers a directional intent.
    ///
    /// The very first intent starts the snake moving right away. After that a
    /// turn is queued only if it leaves the current axis of travel; it is
    /// applied on a later tick, one per tick.
    pub fn steer(&mut self, next: Direction) {
        match self.direction {
            None => self.direction = Some(next),
            Some(current) if is_perpendicular(current, next) => self.turns.push(next),
            Some(_) => {}
        }
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> StepOutcome {
        if self.death_reason.is_some() {
            return StepOutcome::default();
        }

        if let Some(next) = self.turns.pop() {
            let allowed = self
                .direction
                .is_none_or(|current| direction_change_is_valid(current, next));
            if allowed {
                self.direction = Some(next);
            }
        }

        let Some(direction) = self.direction else {
            return StepOutcome::default();
        };
        self.tick_count += 1;

        let mut head = self.snake.head().stepped(direction);
        if self.config.mode.wraps() {
            head = head.wrapped(self.bounds);
        }
        self.snake.push_head(head);

        let mut outcome = StepOutcome::default();
        if head == self.food.position {
            let points = self.food.points();
            self.score += points;
            outcome.score_delta = points;

            match Food::spawn(&mut self.rng, self.bounds, &self.snake, &self.obstacles) {
                Ok(food) => self.food = food,
                Err(error) => {
                    warn!("ending round: {error}");
                    return self.finish(outcome, DeathReason::BoardFull);
                }
            }
        } else {
            let _ = self.snake.pop_tail();
        }

        if self.config.mode == GameMode::Portal
            && let Some(exit) = self.portals.and_then(|portals| portals.exit_for(head))
        {
            self.snake.relocate_head(exit);
        }

        match self.detect_collision() {
            Some(reason) => self.finish(outcome, reason),
            None => outcome,
        }
    }

    fn detect_collision(&self) -> Option<DeathReason> {
        let head = self.snake.head();

        if !self.config.mode.wraps() && !head.is_within_bounds(self.bounds) {
            return Some(DeathReason::WallCollision);
        }

        if self.snake.head_overlaps_body() {
            return Some(DeathReason::SelfCollision);
        }

        if self.config.mode == GameMode::Obstacles && self.obstacles.contains(head) {
            return Some(DeathReason::ObstacleCollision);
        }

        None
    }

    fn finish(&mut self, mut outcome: StepOutcome, reason: DeathReason) -> StepOutcome {
        self.death_reason = Some(reason);
        outcome.terminal = Some(reason);
        outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.death_reason.is_some()
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Current direction of travel; `None` until the first input.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Number of turns still waiting in the queue.
    #[must_use]
    pub fn pending_turns(&self) -> usize {
        self.turns.len()
    }
}
