#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Direction
// =============================================================

#[test]
fn direction_cells_are_unit_steps() {
    assert_eq!(Direction::Up.cells(), (0, -1));
    assert_eq!(Direction::Down.cells(), (0, 1));
    assert_eq!(Direction::Left.cells(), (-1, 0));
    assert_eq!(Direction::Right.cells(), (1, 0));
}

#[test]
fn direction_parses_lowercase_names() {
    for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
        assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
    }
}

#[test]
fn direction_rejects_unknown_name() {
    let err = "north".parse::<Direction>().unwrap_err();
    assert_eq!(err, UnknownDirection("north".into()));
    assert!(err.to_string().contains("north"));
}

#[test]
fn direction_from_arrow_keys() {
    assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
    assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
    assert_eq!(Direction::from_key("Enter"), None);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert!(!InputState::default().is_dragging());
}

#[test]
fn dragging_from_starts_with_zero_residue() {
    let state = InputState::dragging_from(Point::new(5.0, 6.0));
    assert!(state.is_dragging());
    assert_eq!(state, InputState::Dragging { last_world: Point::new(5.0, 6.0), accum_dx: 0.0, accum_dy: 0.0 });
}

// =============================================================
// take_steps
// =============================================================

#[test]
fn take_steps_below_threshold_is_zero() {
    let mut accum = 19.5;
    assert_eq!(take_steps(&mut accum, 20.0, 10), 0);
    assert_eq!(accum, 19.5);
}

#[test]
fn take_steps_drains_whole_cells_and_keeps_residue() {
    let mut accum = 45.0;
    assert_eq!(take_steps(&mut accum, 20.0, 10), 2);
    assert_eq!(accum, 5.0);
    assert_eq!(take_steps(&mut accum, 20.0, 10), 0);
}

#[test]
fn take_steps_negative_motion() {
    let mut accum = -47.0;
    assert_eq!(take_steps(&mut accum, 20.0, 10), -2);
    assert_eq!(accum, -7.0);
}

#[test]
fn take_steps_clamps_huge_motion_to_extent() {
    let mut accum = 1e20;
    assert_eq!(take_steps(&mut accum, 20.0, 16), 16);
    assert!(accum.abs() < 20.0);

    let mut accum = -1e300;
    assert_eq!(take_steps(&mut accum, 0.1, 36), -36);
    assert!(accum.abs() < 0.1);
}

#[test]
fn take_steps_resets_non_finite_accumulator() {
    let mut accum = f64::INFINITY;
    assert_eq!(take_steps(&mut accum, 20.0, 8), 8);
    assert_eq!(accum, 0.0);

    let mut accum = f64::NAN;
    assert_eq!(take_steps(&mut accum, 20.0, 8), 0);
    assert_eq!(accum, 0.0);
}
