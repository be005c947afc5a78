//! Shape factory: archetypes, anchor tags, and deterministic vertex generation.
//!
//! An obstacle's geometry is never edited directly. It is always produced here
//! from the canonical fields (archetype, anchor point, rotation, anchor tag),
//! so a saved map regenerates to exactly the same vertices on load.
//!
//! Generation works in a local frame first: each archetype lays out its
//! unrotated vertices with the apex or top-left corner at the origin. The
//! chosen anchor vertex is then pinned to the anchor point and the polygon is
//! rotated about it.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{BIG_TRIANGLE_CELLS, FRAC_PI_3, QUAD_UNIT_CELLS, SHAPE_SCALE, SMALL_TRIANGLE_CELLS};
use crate::geometry::{Point, Polygon, rotate_point};

/// The fixed set of obstacle shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Equilateral triangle, two cells wide.
    SmallTriangle,
    /// Equilateral triangle, four cells wide.
    BigTriangle,
    /// 60° parallelogram with equal sides.
    Rhombus,
    /// Isosceles trapezoid whose base is twice its top.
    Trapezoid,
}

impl Archetype {
    pub const ALL: [Self; 4] = [Self::SmallTriangle, Self::BigTriangle, Self::Rhombus, Self::Trapezoid];

    /// Wire tag, as used in map documents.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SmallTriangle => "small_triangle",
            Self::BigTriangle => "big_triangle",
            Self::Rhombus => "rhombus",
            Self::Trapezoid => "trapezoid",
        }
    }

    /// Human-readable name for obstacle lists.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::SmallTriangle => "Small triangle",
            Self::BigTriangle => "Big triangle",
            Self::Rhombus => "Rhombus",
            Self::Trapezoid => "Trapezoid",
        }
    }

    /// Anchor tags that select a distinct vertex of this archetype.
    #[must_use]
    pub fn anchors(self) -> &'static [AnchorTag] {
        match self {
            Self::SmallTriangle | Self::BigTriangle => {
                &[AnchorTag::TopLeft, AnchorTag::BottomLeft, AnchorTag::BottomRight]
            }
            Self::Rhombus | Self::Trapezoid => {
                &[AnchorTag::TopLeft, AnchorTag::TopRight, AnchorTag::BottomRight, AnchorTag::BottomLeft]
            }
        }
    }

    /// Vertex index pinned by `tag`. Tags the archetype does not support fall back to vertex 0.
    #[must_use]
    pub fn anchor_index(self, tag: AnchorTag) -> usize {
        match self {
            Self::SmallTriangle | Self::BigTriangle => match tag {
                AnchorTag::BottomLeft => 1,
                AnchorTag::BottomRight => 2,
                AnchorTag::TopLeft | AnchorTag::TopRight => 0,
            },
            Self::Rhombus | Self::Trapezoid => match tag {
                AnchorTag::TopLeft => 0,
                AnchorTag::TopRight => 1,
                AnchorTag::BottomRight => 2,
                AnchorTag::BottomLeft => 3,
            },
        }
    }

    /// Unrotated vertices in the local frame, vertex 0 at the origin.
    #[must_use]
    pub fn local_vertices(self, cell_size: f64) -> Polygon {
        match self {
            Self::SmallTriangle => triangle(SMALL_TRIANGLE_CELLS * cell_size * SHAPE_SCALE),
            Self::BigTriangle => triangle(BIG_TRIANGLE_CELLS * cell_size * SHAPE_SCALE),
            Self::Rhombus => rhombus(QUAD_UNIT_CELLS * cell_size * SHAPE_SCALE),
            Self::Trapezoid => trapezoid(QUAD_UNIT_CELLS * cell_size * SHAPE_SCALE),
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown obstacle type: {0}")]
pub struct UnknownArchetype(pub String);

impl FromStr for Archetype {
    type Err = UnknownArchetype;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownArchetype(s.to_string()))
    }
}

/// Which vertex of the generated polygon is pinned to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorTag {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl AnchorTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
        }
    }

    /// Parse a tag, resolving anything unrecognised to `TopLeft`.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "topRight" => Self::TopRight,
            "bottomLeft" => Self::BottomLeft,
            "bottomRight" => Self::BottomRight,
            _ => Self::TopLeft,
        }
    }
}

impl fmt::Display for AnchorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generate the world-space polygons for an obstacle whose anchor vertex sits at `anchor_point`.
///
/// Deterministic: identical inputs give bit-identical output. The anchor
/// vertex lands exactly on `anchor_point` for every rotation.
#[must_use]
pub fn generate(
    archetype: Archetype,
    cell_size: f64,
    anchor_point: Point,
    rotation_deg: f64,
    anchor: AnchorTag,
) -> Vec<Polygon> {
    let local = archetype.local_vertices(cell_size);
    let pinned = local[archetype.anchor_index(anchor)];
    let polygon = local
        .iter()
        .map(|v| {
            let offset = Point::new(v.x - pinned.x, v.y - pinned.y);
            let r = rotate_point(offset, Point::default(), rotation_deg);
            Point::new(anchor_point.x + r.x, anchor_point.y + r.y)
        })
        .collect();
    vec![polygon]
}

// =============================================================================
// ARCHETYPE LAYOUTS
// =============================================================================

/// Equilateral triangle: apex at the origin, base below at height `(√3/2)·s`.
fn triangle(s: f64) -> Polygon {
    let h = 3f64.sqrt() / 2.0 * s;
    vec![Point::new(0.0, 0.0), Point::new(-s / 2.0, h), Point::new(s / 2.0, h)]
}

fn rhombus(s: f64) -> Polygon {
    let (sin, cos) = FRAC_PI_3.sin_cos();
    vec![
        Point::new(0.0, 0.0),
        Point::new(s, 0.0),
        Point::new(s + s * cos, s * sin),
        Point::new(s * cos, s * sin),
    ]
}

/// Top edge `tw` from the origin, base `2·tw` centred beneath it.
fn trapezoid(tw: f64) -> Polygon {
    let bw = 2.0 * tw;
    let h = 3f64.sqrt() / 2.0 * tw;
    let overhang = (bw - tw) / 2.0;
    vec![
        Point::new(0.0, 0.0),
        Point::new(tw, 0.0),
        Point::new(tw + overhang, h),
        Point::new(-overhang, h),
    ]
}
