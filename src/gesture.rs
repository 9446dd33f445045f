//! Mouse gestures on the play surface.
//!
//! A left-button drag behaves like a touch swipe: every drag event is
//! classified by its dominant axis into a direction. A press released within
//! [`TAP_THRESHOLD`] without having produced a swipe is a tap and toggles pause.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::config::TAP_THRESHOLD;
use crate::input::{Direction, GameInput};

#[derive(Debug, Clone, Copy)]
struct Press {
    column: i32,
    row: i32,
    started_at: Instant,
    swiped: bool,
}

/// Tracks the in-progress press between mouse-down and mouse-up.
#[derive(Debug, Default)]
pub struct GestureTracker {
    press: Option<Press>,
}

impl GestureTracker {
    /// Feeds one mouse event, returning the input it completes, if any.
    pub fn handle(&mut self, event: MouseEvent, now: Instant) -> Option<GameInput> {
        let column = i32::from(event.column);
        let row = i32::from(event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some(Press {
                    column,
                    row,
                    started_at: now,
                    swiped: false,
                });
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let press = self.press.as_mut()?;
                let direction = classify_swipe(column - press.column, row - press.row)?;
                press.column = column;
                press.row = row;
                press.swiped = true;
                Some(GameInput::Swipe(direction))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let press = self.press.take()?;
                let held = now.saturating_duration_since(press.started_at);
                let is_tap = !press.swiped && !held.is_zero() && held < TAP_THRESHOLD;
                is_tap.then_some(GameInput::PauseToggle)
            }
            _ => None,
        }
    }
}

/// Classifies a drag delta in terminal cells by its dominant axis.
///
/// Terminal rows are about twice as tall as columns are wide, so vertical
/// movement is weighted double.
#[must_use]
pub fn classify_swipe(delta_columns: i32, delta_rows: i32) -> Option<Direction> {
    let horizontal = delta_columns.abs();
    let vertical = delta_rows.abs() * 2;

    if horizontal == 0 && vertical == 0 {
        return None;
    }

    let direction = if horizontal > vertical {
        if delta_columns > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta_rows > 0 {
        Direction::Down
    } else {
        Direction::Up
    };

    Some(direction)
}
