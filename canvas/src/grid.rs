//! Grid configuration: cell size, extent, and world-bounds checks.
//!
//! The grid is an explicit value handed to the store and the engine. The host
//! that owns the drawing surface must size it from the same `Grid` so that
//! bounds checks here match what the user sees.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::consts::{DEFAULT_CELL_SIZE, DEFAULT_COLS, DEFAULT_ROWS};
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),
    #[error("grid must have at least one column and one row, got {cols}x{rows}")]
    EmptyExtent { cols: u32, rows: u32 },
}

impl GridError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCellSize(_) => "E_INVALID_CELL_SIZE",
            Self::EmptyExtent { .. } => "E_EMPTY_GRID",
        }
    }
}

/// A fixed-size lattice of square cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    cell_size: f64,
    cols: u32,
    rows: u32,
}

impl Grid {
    /// Build a grid, validating the cell size and extent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCellSize` for a non-finite or non-positive cell size and
    /// `EmptyExtent` when either dimension is zero.
    pub fn new(cell_size: f64, cols: u32, rows: u32) -> Result<Self, GridError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        if cols == 0 || rows == 0 {
            return Err(GridError::EmptyExtent { cols, rows });
        }
        Ok(Self { cell_size, cols, rows })
    }

    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// World width: `cols · cell_size`.
    #[must_use]
    pub fn width(&self) -> f64 {
        f64::from(self.cols) * self.cell_size
    }

    /// World height: `rows · cell_size`.
    #[must_use]
    pub fn height(&self) -> f64 {
        f64::from(self.rows) * self.cell_size
    }

    /// Center of the world rectangle, the pivot for mirror copies.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    /// World position of grid intersection `(gx, gy)`.
    #[must_use]
    pub fn to_world(&self, gx: i32, gy: i32) -> Point {
        Point::new(f64::from(gx) * self.cell_size, f64::from(gy) * self.cell_size)
    }

    /// Nearest grid intersection to a world point, rounding halves upward.
    #[must_use]
    pub fn snap(&self, world: Point) -> (i32, i32) {
        (round_half_up(world.x / self.cell_size), round_half_up(world.y / self.cell_size))
    }

    /// Whether `p` lies inside the closed rectangle `[0, width] × [0, height]`.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width() && p.y <= self.height()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self { cell_size: DEFAULT_CELL_SIZE, cols: DEFAULT_COLS, rows: DEFAULT_ROWS }
    }
}

/// Round to the nearest integer with halves going toward +∞, saturating at the `i32` range.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_half_up(v: f64) -> i32 {
    // `as` saturates for out-of-range floats and maps NaN to 0.
    (v + 0.5).floor() as i32
}

/// Convert a host-supplied grid coordinate to an integer, truncating toward zero.
///
/// Returns `None` for non-finite values and values outside the `i32` range.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn grid_coord(v: f64) -> Option<i32> {
    if !v.is_finite() {
        return None;
    }
    let t = v.trunc();
    if t < f64::from(i32::MIN) || t > f64::from(i32::MAX) {
        return None;
    }
    Some(t as i32)
}
