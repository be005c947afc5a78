//! Obstacle model and the in-memory store that owns every obstacle on the map.
//!
//! An [`Obstacle`] is described by four canonical fields: archetype, anchor
//! point, rotation angle, and anchor tag. Its polygons are derived data. They
//! are rebuilt by the shape factory whenever a canonical field changes and are
//! never edited on their own, which keeps save/reload lossless.
//!
//! [`ObstacleStore`] keeps obstacles in z-order (later entries sit on top)
//! together with an optional selection that always points at a live index.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use tracing::debug;

use crate::consts::HALF_TURN_DEG;
use crate::geometry::{Point, Polygon, normalize_angle, reflect_point};
use crate::grid::{Grid, grid_coord};
use crate::shape::{AnchorTag, Archetype, generate};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("grid position must be finite, got ({x}, {y})")]
    InvalidGridPosition { x: f64, y: f64 },
    #[error("obstacle index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl StoreError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidGridPosition { .. } => "E_INVALID_GRID_POSITION",
            Self::IndexOutOfRange { .. } => "E_INDEX_OUT_OF_RANGE",
        }
    }
}

// =============================================================================
// OBSTACLE
// =============================================================================

/// A placed obstacle. Fields are private so the polygons cannot drift from the canonical state.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    archetype: Archetype,
    anchor_point: Point,
    rotation_angle: f64,
    anchor: AnchorTag,
    shapes: Vec<Polygon>,
}

impl Obstacle {
    /// Build an obstacle from canonical fields. The angle is normalized into `[0, 360)`.
    #[must_use]
    pub fn new(archetype: Archetype, cell_size: f64, anchor_point: Point, rotation_angle: f64, anchor: AnchorTag) -> Self {
        let rotation_angle = normalize_angle(rotation_angle);
        let shapes = generate(archetype, cell_size, anchor_point, rotation_angle, anchor);
        Self { archetype, anchor_point, rotation_angle, anchor, shapes }
    }

    #[must_use]
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// World position of the pinned vertex.
    #[must_use]
    pub fn anchor_point(&self) -> Point {
        self.anchor_point
    }

    /// Accumulated rotation in degrees, always in `[0, 360)`.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    #[must_use]
    pub fn anchor(&self) -> AnchorTag {
        self.anchor
    }

    /// Derived world-space polygons.
    #[must_use]
    pub fn shapes(&self) -> &[Polygon] {
        &self.shapes
    }

    /// Iterate every vertex of every polygon.
    pub fn vertices(&self) -> impl Iterator<Item = &Point> {
        self.shapes.iter().flatten()
    }

    /// Copy with a new anchor point, geometry rebuilt.
    fn with_anchor_point(&self, cell_size: f64, anchor_point: Point) -> Self {
        Self::new(self.archetype, cell_size, anchor_point, self.rotation_angle, self.anchor)
    }

    /// Copy turned by `delta_deg` about the anchor point, geometry rebuilt.
    fn rotated(&self, cell_size: f64, delta_deg: f64) -> Self {
        Self::new(self.archetype, cell_size, self.anchor_point, self.rotation_angle + delta_deg, self.anchor)
    }

    /// Point reflection through `center`: same archetype and tag, anchor reflected, half a turn added.
    ///
    /// The reflected anchor is snapped back onto `grid` and rebuilt from its
    /// integer coordinates, so it stays exactly `g · cell_size`.
    fn mirrored(&self, grid: &Grid, center: Point) -> Self {
        let (gx, gy) = grid.snap(reflect_point(self.anchor_point, center));
        Self::new(
            self.archetype,
            grid.cell_size(),
            grid.to_world(gx, gy),
            self.rotation_angle + HALF_TURN_DEG,
            self.anchor,
        )
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Ordered obstacles plus the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleStore {
    grid: Grid,
    obstacles: Vec<Obstacle>,
    selected: Option<usize>,
}

impl ObstacleStore {
    /// Create an empty store on `grid`.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self { grid, obstacles: Vec::new(), selected: None }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Obstacles in draw order (bottom first).
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    // --- Creation / removal ---

    /// Append a new unrotated obstacle anchored at grid intersection `(grid_x, grid_y)`.
    ///
    /// Fractional coordinates are truncated toward zero. Returns the new index.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGridPosition` when either coordinate is non-finite or out of range.
    pub fn add(&mut self, archetype: Archetype, grid_x: f64, grid_y: f64, anchor: AnchorTag) -> Result<usize, StoreError> {
        let (Some(gx), Some(gy)) = (grid_coord(grid_x), grid_coord(grid_y)) else {
            return Err(StoreError::InvalidGridPosition { x: grid_x, y: grid_y });
        };
        let anchor_point = self.grid.to_world(gx, gy);
        let index = self.push(Obstacle::new(archetype, self.grid.cell_size(), anchor_point, 0.0, anchor));
        debug!(index, %archetype, gx, gy, %anchor, "obstacle added");
        Ok(index)
    }

    /// Append an obstacle rebuilt from canonical fields. Returns the new index.
    pub(crate) fn push_canonical(
        &mut self,
        archetype: Archetype,
        anchor_point: Point,
        rotation_angle: f64,
        anchor: AnchorTag,
    ) -> usize {
        let obstacle = Obstacle::new(archetype, self.grid.cell_size(), anchor_point, rotation_angle, anchor);
        self.push(obstacle)
    }

    fn push(&mut self, obstacle: Obstacle) -> usize {
        self.obstacles.push(obstacle);
        self.obstacles.len() - 1
    }

    /// Remove the obstacle at `index`.
    ///
    /// Removing the selected obstacle clears the selection; a selection above
    /// `index` shifts down so it keeps pointing at the same obstacle.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a live index.
    pub fn remove(&mut self, index: usize) -> Result<Obstacle, StoreError> {
        self.check_index(index)?;
        let removed = self.obstacles.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        debug!(index, remaining = self.obstacles.len(), "obstacle removed");
        Ok(removed)
    }

    /// Remove every obstacle and clear the selection.
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.selected = None;
    }

    // --- Selection ---

    /// Set or clear the selection.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is `Some` but not a live index.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), StoreError> {
        if let Some(i) = index {
            self.check_index(i)?;
        }
        self.selected = index;
        Ok(())
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Obstacle> {
        self.selected.and_then(|i| self.obstacles.get(i))
    }

    // --- Transforms ---

    /// Rotate the obstacle at `index` by `delta_deg` about its anchor point. Returns the new angle.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a live index.
    pub fn rotate(&mut self, index: usize, delta_deg: f64) -> Result<f64, StoreError> {
        self.check_index(index)?;
        let cell_size = self.grid.cell_size();
        let obstacle = &mut self.obstacles[index];
        *obstacle = obstacle.rotated(cell_size, delta_deg);
        debug!(index, delta_deg, angle = obstacle.rotation_angle, "obstacle rotated");
        Ok(obstacle.rotation_angle)
    }

    /// Rotate the selected obstacle. Returns the new angle, or `None` when nothing is selected.
    pub fn rotate_selected(&mut self, delta_deg: f64) -> Option<f64> {
        let index = self.selected?;
        match self.rotate(index, delta_deg) {
            Ok(angle) => Some(angle),
            Err(_) => None,
        }
    }

    /// Append a point-reflected copy of every obstacle. Returns how many were added.
    ///
    /// Copies land on the grid intersection nearest the reflected anchor,
    /// which is the reflected anchor itself whenever `center` is the world
    /// center.
    pub fn mirror_all(&mut self, center: Point) -> usize {
        let grid = self.grid;
        let copies: Vec<Obstacle> = self.obstacles.iter().map(|o| o.mirrored(&grid, center)).collect();
        let added = copies.len();
        self.obstacles.extend(copies);
        debug!(added, cx = center.x, cy = center.y, "obstacles mirrored");
        added
    }

    /// Move the obstacle at `index` by whole cells.
    ///
    /// The move is all-or-nothing: if any vertex of any polygon would leave
    /// the world bounds the obstacle is left untouched and `Ok(false)` is
    /// returned. A zero move also returns `Ok(false)`, as does a move whose
    /// target grid coordinate overflows.
    ///
    /// The target anchor is rebuilt from integer grid coordinates rather than
    /// by adding world offsets, so repeated moves never drift off the grid.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a live index.
    pub fn move_by(&mut self, index: usize, cells_x: i32, cells_y: i32) -> Result<bool, StoreError> {
        self.check_index(index)?;
        if cells_x == 0 && cells_y == 0 {
            return Ok(false);
        }
        let current = &self.obstacles[index];
        let (gx, gy) = self.grid.snap(current.anchor_point);
        let (Some(tx), Some(ty)) = (gx.checked_add(cells_x), gy.checked_add(cells_y)) else {
            return Ok(false);
        };
        let candidate = current.with_anchor_point(self.grid.cell_size(), self.grid.to_world(tx, ty));
        if !candidate.vertices().all(|p| self.grid.contains(*p)) {
            debug!(index, cells_x, cells_y, "move blocked at world bounds");
            return Ok(false);
        }
        self.obstacles[index] = candidate;
        Ok(true)
    }

    // --- Listing ---

    /// One label per obstacle, numbered per archetype in store order (`Rhombus 1`, `Rhombus 2`).
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut counts: HashMap<Archetype, usize> = HashMap::new();
        self.obstacles
            .iter()
            .map(|o| {
                let n = counts.entry(o.archetype).or_insert(0);
                *n += 1;
                format!("{} {n}", o.archetype.display_name())
            })
            .collect()
    }

    /// `Selected: <label>` or `Selected: none`.
    #[must_use]
    pub fn selected_label(&self) -> String {
        let label = self
            .selected
            .and_then(|i| self.labels().into_iter().nth(i))
            .unwrap_or_else(|| "none".to_string());
        format!("Selected: {label}")
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.obstacles.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange { index, len: self.obstacles.len() })
        }
    }
}

impl Default for ObstacleStore {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}
