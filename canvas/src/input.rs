//! Input model: nudge directions and the drag gesture state machine.
//!
//! Pointer motion arrives as continuous world-space deltas, but obstacles only
//! ever sit on grid intersections. `InputState::Dragging` carries the
//! sub-cell residue between frames so slow drags still add up to whole-cell
//! steps, and the residue is dropped when the gesture ends.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use crate::geometry::Point;

/// One-cell nudge direction for keyboard arrows or on-screen pad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell offset `(dx, dy)` in a y-down grid.
    #[must_use]
    pub fn cells(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Map a browser key name (`"ArrowUp"`, ...) to a direction. Other keys give `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0} (expected up, down, left or right)")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The selected obstacle is being dragged.
    Dragging {
        /// World-space pointer position at the previous event.
        last_world: Point,
        /// Horizontal motion not yet turned into a cell step.
        accum_dx: f64,
        /// Vertical motion not yet turned into a cell step.
        accum_dy: f64,
    },
}

impl InputState {
    /// Start a drag at `world_pt` with empty accumulators.
    #[must_use]
    pub fn dragging_from(world_pt: Point) -> Self {
        Self::Dragging { last_world: world_pt, accum_dx: 0.0, accum_dy: 0.0 }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Split `accum` into whole signed cell steps, leaving the sub-cell remainder in `accum`.
///
/// The count is clamped to `±max_steps`. Callers pass the grid extent on that
/// axis, since no obstacle can take more steps than that without leaving the
/// world. Steps are removed whether or not the caller manages to apply them,
/// so a move blocked at the world edge is retried only after another full cell
/// of pointer motion. A remainder that overflows to a non-finite value resets to 0.
#[allow(clippy::cast_possible_truncation)]
pub fn take_steps(accum: &mut f64, cell_size: f64, max_steps: u32) -> i32 {
    let whole = (*accum / cell_size).trunc();
    *accum %= cell_size;
    if !accum.is_finite() {
        *accum = 0.0;
    }
    let cap = f64::from(max_steps);
    // NaN casts to 0; the clamp keeps the cast in range.
    whole.clamp(-cap, cap) as i32
}
