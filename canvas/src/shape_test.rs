#![allow(clippy::float_cmp)]

use super::*;
use crate::grid::Grid;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn dist(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

const ALL_ANCHORS: [AnchorTag; 4] = [AnchorTag::TopLeft, AnchorTag::TopRight, AnchorTag::BottomLeft, AnchorTag::BottomRight];

// =============================================================
// Archetype tags
// =============================================================

#[test]
fn archetype_serde_uses_snake_case() {
    let cases = [
        (Archetype::SmallTriangle, "\"small_triangle\""),
        (Archetype::BigTriangle, "\"big_triangle\""),
        (Archetype::Rhombus, "\"rhombus\""),
        (Archetype::Trapezoid, "\"trapezoid\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        assert_eq!(kind.to_string(), expected.trim_matches('"'));
    }
}

#[test]
fn archetype_from_str_round_trips_tags() {
    for kind in Archetype::ALL {
        assert_eq!(kind.as_str().parse::<Archetype>().unwrap(), kind);
    }
}

#[test]
fn archetype_from_str_rejects_unknown() {
    let err = "hexagon".parse::<Archetype>().unwrap_err();
    assert_eq!(err, UnknownArchetype("hexagon".into()));
    assert!(err.to_string().contains("hexagon"));
    assert!("Rhombus".parse::<Archetype>().is_err());
}

#[test]
fn archetype_display_names() {
    assert_eq!(Archetype::SmallTriangle.display_name(), "Small triangle");
    assert_eq!(Archetype::Trapezoid.display_name(), "Trapezoid");
}

// =============================================================
// Anchor tags
// =============================================================

#[test]
fn anchor_serde_uses_camel_case() {
    assert_eq!(serde_json::to_string(&AnchorTag::BottomRight).unwrap(), "\"bottomRight\"");
    let back: AnchorTag = serde_json::from_str("\"topRight\"").unwrap();
    assert_eq!(back, AnchorTag::TopRight);
}

#[test]
fn anchor_parse_lenient_falls_back_to_top_left() {
    assert_eq!(AnchorTag::parse_lenient("bottomLeft"), AnchorTag::BottomLeft);
    assert_eq!(AnchorTag::parse_lenient("center"), AnchorTag::TopLeft);
    assert_eq!(AnchorTag::parse_lenient(""), AnchorTag::TopLeft);
}

#[test]
fn triangle_anchor_table() {
    for kind in [Archetype::SmallTriangle, Archetype::BigTriangle] {
        assert_eq!(kind.anchor_index(AnchorTag::TopLeft), 0);
        assert_eq!(kind.anchor_index(AnchorTag::BottomLeft), 1);
        assert_eq!(kind.anchor_index(AnchorTag::BottomRight), 2);
        assert_eq!(kind.anchor_index(AnchorTag::TopRight), 0);
        assert_eq!(kind.anchors().len(), 3);
    }
}

#[test]
fn quad_anchor_table() {
    for kind in [Archetype::Rhombus, Archetype::Trapezoid] {
        assert_eq!(kind.anchor_index(AnchorTag::TopLeft), 0);
        assert_eq!(kind.anchor_index(AnchorTag::TopRight), 1);
        assert_eq!(kind.anchor_index(AnchorTag::BottomRight), 2);
        assert_eq!(kind.anchor_index(AnchorTag::BottomLeft), 3);
        assert_eq!(kind.anchors().len(), 4);
    }
}

// =============================================================
// Local layouts
// =============================================================

#[test]
fn small_triangle_is_equilateral_with_scaled_side() {
    let v = Archetype::SmallTriangle.local_vertices(30.0);
    assert_eq!(v.len(), 3);
    assert_eq!(v[0], Point::new(0.0, 0.0));
    let s = 2.0 * 30.0 * 0.9;
    assert!(approx_eq(dist(v[0], v[1]), s));
    assert!(approx_eq(dist(v[1], v[2]), s));
    assert!(approx_eq(dist(v[2], v[0]), s));
    assert!(approx_eq(v[1].y, 3f64.sqrt() / 2.0 * s));
}

#[test]
fn big_triangle_is_twice_the_small_one() {
    let small = Archetype::SmallTriangle.local_vertices(20.0);
    let big = Archetype::BigTriangle.local_vertices(20.0);
    for (s, b) in small.iter().zip(&big) {
        assert!(approx_eq(b.x, 2.0 * s.x));
        assert!(approx_eq(b.y, 2.0 * s.y));
    }
}

#[test]
fn rhombus_has_equal_sides_and_sixty_degree_corner() {
    let v = Archetype::Rhombus.local_vertices(20.0);
    let s = 2.0 * 20.0 * 0.9;
    for i in 0..4 {
        assert!(approx_eq(dist(v[i], v[(i + 1) % 4]), s), "side {i}");
    }
    // The short diagonal of a 60° rhombus equals its side.
    assert!(approx_eq(dist(v[1], v[3]), s));
}

#[test]
fn trapezoid_widths_and_height() {
    let v = Archetype::Trapezoid.local_vertices(20.0);
    let tw = 2.0 * 20.0 * 0.9;
    assert!(approx_eq(dist(v[0], v[1]), tw));
    assert!(approx_eq(dist(v[3], v[2]), 2.0 * tw));
    assert!(approx_eq(v[2].y, 3f64.sqrt() / 2.0 * tw));
    // Base overhangs equally on both sides.
    assert!(approx_eq(-v[3].x, v[2].x - tw));
}

// =============================================================
// generate
// =============================================================

#[test]
fn generate_returns_single_polygon() {
    for kind in Archetype::ALL {
        let shapes = generate(kind, 20.0, Point::new(100.0, 100.0), 0.0, AnchorTag::TopLeft);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].len(), kind.local_vertices(20.0).len());
    }
}

#[test]
fn generate_pins_anchor_vertex_exactly() {
    let anchor = Point::new(60.0, 100.0);
    for kind in Archetype::ALL {
        for tag in ALL_ANCHORS {
            for angle in [0.0, 30.0, 90.0, 137.5, 180.0, 300.0] {
                let shapes = generate(kind, 20.0, anchor, angle, tag);
                assert_eq!(shapes[0][kind.anchor_index(tag)], anchor, "{kind} {tag} {angle}");
            }
        }
    }
}

#[test]
fn generate_is_deterministic() {
    for kind in Archetype::ALL {
        for tag in ALL_ANCHORS {
            let a = generate(kind, 30.0, Point::new(90.0, 240.0), 73.25, tag);
            let b = generate(kind, 30.0, Point::new(90.0, 240.0), 73.25, tag);
            assert_eq!(a, b);
        }
    }
}

#[test]
fn generate_unrotated_rhombus_at_cell() {
    let grid = Grid::new(20.0, 20, 20).unwrap();
    let shapes = generate(Archetype::Rhombus, grid.cell_size(), grid.to_world(3, 5), 0.0, AnchorTag::TopLeft);
    let s = 36.0;
    assert_eq!(shapes[0][0], Point::new(60.0, 100.0));
    assert!(point_approx_eq(shapes[0][1], Point::new(60.0 + s, 100.0)));
    assert!(point_approx_eq(shapes[0][3], Point::new(60.0 + s / 2.0, 100.0 + s * 3f64.sqrt() / 2.0)));
}

#[test]
fn generate_bottom_right_anchor_hangs_shape_up_and_left() {
    let shapes = generate(Archetype::SmallTriangle, 20.0, Point::new(100.0, 100.0), 0.0, AnchorTag::BottomRight);
    let tri = &shapes[0];
    assert_eq!(tri[2], Point::new(100.0, 100.0));
    assert!(tri[0].y < 100.0);
    assert!(tri[1].x < 100.0);
}

#[test]
fn generate_rotation_matches_kernel_rotation() {
    let anchor = Point::new(200.0, 200.0);
    let base = generate(Archetype::Trapezoid, 20.0, anchor, 0.0, AnchorTag::TopRight);
    let turned = generate(Archetype::Trapezoid, 20.0, anchor, 45.0, AnchorTag::TopRight);
    for (b, t) in base[0].iter().zip(&turned[0]) {
        assert!(point_approx_eq(rotate_point(*b, anchor, 45.0), *t));
    }
}

#[test]
fn generate_half_turn_equals_point_reflection() {
    let a = Point::new(60.0, 100.0);
    let c = Point::new(240.0, 540.0);
    let mirrored_anchor = Point::new(2.0 * c.x - a.x, 2.0 * c.y - a.y);
    let original = generate(Archetype::BigTriangle, 30.0, a, 40.0, AnchorTag::BottomLeft);
    let regenerated = generate(Archetype::BigTriangle, 30.0, mirrored_anchor, 220.0, AnchorTag::BottomLeft);
    for (o, r) in original[0].iter().zip(&regenerated[0]) {
        assert!(point_approx_eq(Point::new(2.0 * c.x - o.x, 2.0 * c.y - o.y), *r));
    }
}
