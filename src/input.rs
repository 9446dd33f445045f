use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::gesture::GestureTracker;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit `(dx, dy)` step; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// High-level input events produced by the keyboard and mouse adapters.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Direction recognised from a mouse drag; only steers a running game.
    Swipe(Direction),
    PauseToggle,
    Confirm,
    Menu,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Returns whether `next` turns onto the other axis than `current`.
#[must_use]
pub fn is_perpendicular(current: Direction, next: Direction) -> bool {
    current.is_horizontal() != next.is_horizontal()
}

/// FIFO of direction changes waiting for the next ticks, one consumed per tick.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
}

impl DirectionQueue {
    pub fn push(&mut self, direction: Direction) {
        self.pending.push_back(direction);
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Maps one key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::PauseToggle,
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Esc | KeyCode::Char('m' | 'M') => GameInput::Menu,
        KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Reads terminal events and turns them into [`GameInput`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    gestures: GestureTracker,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for one event and translates it.
    ///
    /// Returns `Ok(None)` when the timeout elapses or the event carries no game
    /// meaning (resize, key release, unrelated mouse button).
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let input = match event::read()? {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.gestures.handle(mouse, Instant::now()),
            _ => None,
        };

        Ok(input)
    }
}
