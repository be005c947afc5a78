//! Shared numeric constants for the canvas crate.

// ── Grid defaults ───────────────────────────────────────────────

/// Default side length of one grid cell in world units.
pub const DEFAULT_CELL_SIZE: f64 = 30.0;

/// Default number of grid columns.
pub const DEFAULT_COLS: u32 = 16;

/// Default number of grid rows.
pub const DEFAULT_ROWS: u32 = 36;

// ── Shapes ──────────────────────────────────────────────────────

/// Shrink factor applied to every archetype so neighbouring obstacles leave a visible gap.
pub const SHAPE_SCALE: f64 = 0.9;

/// Small triangle side, in cells (before [`SHAPE_SCALE`]).
pub const SMALL_TRIANGLE_CELLS: f64 = 2.0;

/// Big triangle side, in cells (before [`SHAPE_SCALE`]).
pub const BIG_TRIANGLE_CELLS: f64 = 4.0;

/// Rhombus side and trapezoid top width, in cells (before [`SHAPE_SCALE`]).
pub const QUAD_UNIT_CELLS: f64 = 2.0;

/// π / 3 (60°) — interior angle used by the rhombus construction.
pub const FRAC_PI_3: f64 = std::f64::consts::FRAC_PI_3;

// ── Angles ──────────────────────────────────────────────────────

/// One full turn in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Half turn in degrees; a point reflection equals this rotation plus a translation.
pub const HALF_TURN_DEG: f64 = 180.0;
