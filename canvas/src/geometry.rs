//! Geometry kernel: points, rotation, translation and polygon containment.
//!
//! Everything here is pure math on world-space `f64` coordinates. Nothing
//! knows about grids or obstacles; the shape factory and the store build on
//! these primitives.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::FULL_TURN_DEG;

/// A point in world space (or client space, before viewport mapping).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this point shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A closed polygon given as its vertex sequence; the last vertex connects back to the first.
pub type Polygon = Vec<Point>;

/// Rotate `p` about `center` by `angle_deg` degrees.
///
/// Uses the matrix `[[cos, -sin], [sin, cos]]`. With a y-down world this turns
/// clockwise on screen for positive angles. Any real angle is accepted.
#[must_use]
pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point { x: center.x + dx * cos - dy * sin, y: center.y + dx * sin + dy * cos }
}

/// Rotate every vertex of every polygon about `center`.
#[must_use]
pub fn rotate_polygons(polygons: &[Polygon], center: Point, angle_deg: f64) -> Vec<Polygon> {
    polygons
        .iter()
        .map(|poly| poly.iter().map(|p| rotate_point(*p, center, angle_deg)).collect())
        .collect()
}

/// Shift every vertex of every polygon by `(dx, dy)`.
#[must_use]
pub fn translate_polygons(polygons: &[Polygon], dx: f64, dy: f64) -> Vec<Polygon> {
    polygons
        .iter()
        .map(|poly| poly.iter().map(|p| p.translated(dx, dy)).collect())
        .collect()
}

/// Point reflection of `p` through `center`: `(2·cx − x, 2·cy − y)`.
#[must_use]
pub fn reflect_point(p: Point, center: Point) -> Point {
    Point { x: 2.0 * center.x - p.x, y: 2.0 * center.y - p.y }
}

/// Even-odd (ray casting) containment test.
///
/// The polygon wraps from its last vertex back to the first. Points exactly on
/// an edge may land on either side; archetypes are simple convex polygons so
/// this only matters for clicks that hit a boundary pixel.
#[must_use]
pub fn point_in_polygon(pt: Point, polygon: &[Point]) -> bool {
    let Some(mut prev) = polygon.last().copied() else {
        return false;
    };
    let mut inside = false;
    for &cur in polygon {
        if (cur.y > pt.y) != (prev.y > pt.y) {
            let cross_x = (prev.x - cur.x) * (pt.y - cur.y) / (prev.y - cur.y) + cur.x;
            if pt.x < cross_x {
                inside = !inside;
            }
        }
        prev = cur;
    }
    inside
}

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Non-finite input collapses to `0`.
#[must_use]
pub fn normalize_angle(angle_deg: f64) -> f64 {
    if !angle_deg.is_finite() {
        return 0.0;
    }
    let r = angle_deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs, and -0.0 must become 0.
    if r >= FULL_TURN_DEG || r <= 0.0 { 0.0 } else { r }
}
