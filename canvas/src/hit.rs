//! Hit-testing: resolve a world point to the obstacle under it.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Obstacle, ObstacleStore};
use crate::geometry::{Point, point_in_polygon};

/// Whether `world_pt` falls inside any polygon of `obstacle`.
#[must_use]
pub fn hits(obstacle: &Obstacle, world_pt: Point) -> bool {
    obstacle.shapes().iter().any(|poly| point_in_polygon(world_pt, poly))
}

/// Index of the topmost obstacle under `world_pt`, scanning from the last (topmost) entry down.
#[must_use]
pub fn pick(store: &ObstacleStore, world_pt: Point) -> Option<usize> {
    store.obstacles().iter().rposition(|o| hits(o, world_pt))
}

/// Whether `world_pt` lies on the currently selected obstacle. Gates drag start.
#[must_use]
pub fn is_on_selected(store: &ObstacleStore, world_pt: Point) -> bool {
    store.selected().is_some_and(|o| hits(o, world_pt))
}
