#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Construction
// =============================================================

#[test]
fn default_matches_editor_layout() {
    let g = Grid::default();
    assert_eq!(g.cell_size(), 30.0);
    assert_eq!(g.cols(), 16);
    assert_eq!(g.rows(), 36);
    assert_eq!(g.width(), 480.0);
    assert_eq!(g.height(), 1080.0);
}

#[test]
fn new_accepts_valid_values() {
    let g = Grid::new(20.0, 10, 5).unwrap();
    assert_eq!(g.width(), 200.0);
    assert_eq!(g.height(), 100.0);
}

#[test]
fn new_rejects_bad_cell_size() {
    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = Grid::new(bad, 10, 10).unwrap_err();
        assert_eq!(err.error_code(), "E_INVALID_CELL_SIZE");
    }
}

#[test]
fn new_rejects_empty_extent() {
    let err = Grid::new(20.0, 0, 10).unwrap_err();
    assert_eq!(err, GridError::EmptyExtent { cols: 0, rows: 10 });
    assert!(err.to_string().contains("0x10"));
}

// =============================================================
// Coordinates
// =============================================================

#[test]
fn to_world_scales_by_cell_size() {
    let g = Grid::new(20.0, 10, 10).unwrap();
    assert_eq!(g.to_world(3, 5), Point::new(60.0, 100.0));
    assert_eq!(g.to_world(-1, 0), Point::new(-20.0, 0.0));
}

#[test]
fn center_is_half_extent() {
    let g = Grid::new(20.0, 7, 4).unwrap();
    assert_eq!(g.center(), Point::new(70.0, 40.0));
}

#[test]
fn snap_rounds_to_nearest_cell() {
    let g = Grid::new(20.0, 10, 10).unwrap();
    assert_eq!(g.snap(Point::new(60.0, 100.0)), (3, 5));
    assert_eq!(g.snap(Point::new(69.0, 91.0)), (3, 5));
    assert_eq!(g.snap(Point::new(70.0, 110.0)), (4, 6));
}

#[test]
fn snap_rounds_negative_halves_upward() {
    let g = Grid::new(20.0, 10, 10).unwrap();
    assert_eq!(g.snap(Point::new(-10.0, -30.0)), (0, -1));
}

#[test]
fn round_half_up_saturates() {
    assert_eq!(round_half_up(1e300), i32::MAX);
    assert_eq!(round_half_up(-1e300), i32::MIN);
    assert_eq!(round_half_up(f64::NAN), 0);
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn contains_includes_edges() {
    let g = Grid::new(20.0, 10, 10).unwrap();
    assert!(g.contains(Point::new(0.0, 0.0)));
    assert!(g.contains(Point::new(200.0, 200.0)));
    assert!(g.contains(Point::new(0.0, 200.0)));
}

#[test]
fn contains_rejects_outside() {
    let g = Grid::new(20.0, 10, 10).unwrap();
    assert!(!g.contains(Point::new(-0.5, 10.0)));
    assert!(!g.contains(Point::new(10.0, 200.5)));
    assert!(!g.contains(Point::new(f64::NAN, 10.0)));
    assert!(!g.contains(Point::new(-1e-12, 10.0)));
    assert!(!g.contains(Point::new(10.0, 200.0 + 1e-12)));
}

// =============================================================
// grid_coord
// =============================================================

#[test]
fn grid_coord_truncates_toward_zero() {
    assert_eq!(grid_coord(3.0), Some(3));
    assert_eq!(grid_coord(3.7), Some(3));
    assert_eq!(grid_coord(-2.9), Some(-2));
}

#[test]
fn grid_coord_rejects_non_finite_and_huge() {
    assert_eq!(grid_coord(f64::NAN), None);
    assert_eq!(grid_coord(f64::NEG_INFINITY), None);
    assert_eq!(grid_coord(1e12), None);
}
