use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so a head that has just left the field can still be
/// represented and detected as a wall collision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring position one cell away in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Segments closest to the head that never count as a self collision.
pub const SELF_COLLISION_EXEMPT_SEGMENTS: usize = 4;

/// Ordered snake body, head at the front.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);
        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Adds a new head segment.
    pub fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    /// Drops the tail segment, keeping at least the head.
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Moves the head cell in place, leaving the body untouched.
    pub fn relocate_head(&mut self, position: Position) {
        if let Some(head) = self.body.front_mut() {
            *head = position;
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps a segment at index 4 or later.
    ///
    /// The head and the three segments right behind it are skipped on purpose.
    /// A tight turn can never reach them, and the skip keeps compatibility with
    /// the long-standing scoring of this game even though it lets some short
    /// loops pass unnoticed.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body
            .iter()
            .skip(SELF_COLLISION_EXEMPT_SEGMENTS)
            .any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
