//! Client-to-world pointer mapping for a canvas displayed at a different size.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::geometry::Point;
use crate::grid::Grid;

/// Where the canvas is displayed in client space.
///
/// The host may stretch the canvas with CSS, so a client pixel is not a world
/// unit. `left` / `top` are the canvas origin in client pixels; `width` /
/// `height` are its displayed size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a client-space point to world coordinates on `grid`.
    ///
    /// A zero or negative displayed size maps with scale 1.
    #[must_use]
    pub fn to_world(&self, client: Point, grid: &Grid) -> Point {
        Point {
            x: (client.x - self.left) * scale(grid.width(), self.width),
            y: (client.y - self.top) * scale(grid.height(), self.height),
        }
    }
}

fn scale(world: f64, displayed: f64) -> f64 {
    if displayed > 0.0 && displayed.is_finite() { world / displayed } else { 1.0 }
}
