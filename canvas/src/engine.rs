//! Command surface for the host: every user gesture maps to one method returning [`Action`]s.

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::codec::{self, CodecError, MapDocument, ParsedMap};
use crate::doc::{Obstacle, ObstacleStore, StoreError};
use crate::geometry::Point;
use crate::grid::Grid;
use crate::hit;
use crate::input::{Direction, InputState, take_steps};
use crate::shape::{AnchorTag, Archetype, UnknownArchetype};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from commands for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ObstacleAdded { index: usize },
    ObstacleRemoved { index: usize },
    ObstacleMoved { index: usize, anchor_point: Point },
    ObstacleRotated { index: usize, angle: f64 },
    Mirrored { added: usize },
    Cleared,
    SelectionChanged(Option<usize>),
    DocumentLoaded { loaded: usize, skipped: usize },
    RenderNeeded,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    UnknownArchetype(#[from] UnknownArchetype),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl EngineError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownArchetype(_) => "E_UNKNOWN_ARCHETYPE",
            Self::Store(e) => e.error_code(),
            Self::Codec(e) => e.error_code(),
        }
    }
}

/// Engine state behind the command surface.
///
/// Owns the obstacle store, the drag gesture, and the viewport. The host
/// layer turns raw events into these commands and reacts to the returned
/// [`Action`]s; nothing here touches the drawing surface.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub store: ObstacleStore,
    pub input: InputState,
    pub viewport: Viewport,
    map_name: Option<String>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self { store: ObstacleStore::new(grid), input: InputState::Idle, viewport: Viewport::default(), map_name: None }
    }

    // --- Obstacle lifecycle ---

    /// Add an unrotated obstacle at grid intersection `(grid_x, grid_y)`.
    ///
    /// Unknown anchor tags resolve to `topLeft`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownArchetype` for an unrecognised `kind`, or
    /// `Store(InvalidGridPosition)` for non-finite coordinates. The store is
    /// unchanged on error.
    pub fn add_obstacle(&mut self, kind: &str, grid_x: f64, grid_y: f64, anchor: &str) -> Result<Vec<Action>, EngineError> {
        let archetype = kind.parse::<Archetype>().inspect_err(|e| warn!(error = %e, "add rejected"))?;
        let index = self
            .store
            .add(archetype, grid_x, grid_y, AnchorTag::parse_lenient(anchor))
            .inspect_err(|e| warn!(error = %e, "add rejected"))?;
        Ok(vec![Action::ObstacleAdded { index }, Action::RenderNeeded])
    }

    /// Delete the obstacle at `index`.
    ///
    /// # Errors
    ///
    /// Returns `Store(IndexOutOfRange)` if `index` is not a live index.
    pub fn delete_obstacle(&mut self, index: usize) -> Result<Vec<Action>, EngineError> {
        let before = self.store.selected_index();
        self.store.remove(index)?;
        let mut actions = vec![Action::ObstacleRemoved { index }];
        let after = self.store.selected_index();
        if after != before {
            actions.push(Action::SelectionChanged(after));
        }
        if after.is_none() {
            self.input = InputState::Idle;
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Remove every obstacle, clear the selection and drop any drag.
    pub fn clear_all(&mut self) -> Vec<Action> {
        self.store.clear();
        self.input = InputState::Idle;
        vec![Action::Cleared, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    // --- Selection ---

    /// Select the topmost obstacle under `world_pt`; empty space clears the selection.
    pub fn select_at(&mut self, world_pt: Point) -> Vec<Action> {
        if !world_pt.is_finite() {
            warn!(x = world_pt.x, y = world_pt.y, "ignoring non-finite pointer");
            return Vec::new();
        }
        let picked = hit::pick(&self.store, world_pt);
        self.set_selection(picked)
    }

    /// Select by index, or clear with `None`.
    ///
    /// # Errors
    ///
    /// Returns `Store(IndexOutOfRange)` for an index past the end; the selection is unchanged.
    pub fn select_index(&mut self, index: Option<usize>) -> Result<Vec<Action>, EngineError> {
        if let Some(i) = index {
            if self.store.get(i).is_none() {
                return Err(StoreError::IndexOutOfRange { index: i, len: self.store.len() }.into());
            }
        }
        Ok(self.set_selection(index))
    }

    fn set_selection(&mut self, index: Option<usize>) -> Vec<Action> {
        if self.store.selected_index() == index {
            return Vec::new();
        }
        match self.store.select(index) {
            Ok(()) => vec![Action::SelectionChanged(index), Action::RenderNeeded],
            Err(e) => {
                warn!(error = %e, "selection rejected");
                Vec::new()
            }
        }
    }

    // --- Transforms ---

    /// Rotate the selected obstacle about its anchor point. No selection or a non-finite delta is a no-op.
    pub fn rotate_selected(&mut self, delta_deg: f64) -> Vec<Action> {
        if !delta_deg.is_finite() {
            warn!(delta_deg, "ignoring non-finite rotation");
            return Vec::new();
        }
        let Some(index) = self.store.selected_index() else {
            return Vec::new();
        };
        match self.store.rotate_selected(delta_deg) {
            Some(angle) => vec![Action::ObstacleRotated { index, angle }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Append a copy of every obstacle reflected through the world center.
    pub fn mirror_all(&mut self) -> Vec<Action> {
        let center = self.store.grid().center();
        let added = self.store.mirror_all(center);
        if added == 0 {
            return Vec::new();
        }
        vec![Action::Mirrored { added }, Action::RenderNeeded]
    }

    /// Nudge the selected obstacle one cell. Blocked or unselected moves return no actions.
    pub fn move_selected(&mut self, direction: Direction) -> Vec<Action> {
        let Some(index) = self.store.selected_index() else {
            return Vec::new();
        };
        let (cx, cy) = direction.cells();
        let mut actions = self.try_move(index, cx, cy);
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Map a browser key name to a nudge. Keys other than the arrows are ignored.
    pub fn on_key_down(&mut self, key: &str) -> Vec<Action> {
        match Direction::from_key(key) {
            Some(direction) => self.move_selected(direction),
            None => Vec::new(),
        }
    }

    fn try_move(&mut self, index: usize, cells_x: i32, cells_y: i32) -> Vec<Action> {
        match self.store.move_by(index, cells_x, cells_y) {
            Ok(true) => self
                .store
                .get(index)
                .map(|o| vec![Action::ObstacleMoved { index, anchor_point: o.anchor_point() }])
                .unwrap_or_default(),
            Ok(false) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "move rejected");
                Vec::new()
            }
        }
    }

    // --- Drag ---

    /// Pointer down at `world_pt`.
    ///
    /// On the selected obstacle this starts a drag. Anywhere else it only
    /// picks, so a press on empty canvas never drags the old selection.
    pub fn begin_drag(&mut self, world_pt: Point) -> Vec<Action> {
        if !world_pt.is_finite() {
            warn!(x = world_pt.x, y = world_pt.y, "ignoring non-finite pointer");
            return Vec::new();
        }
        if hit::is_on_selected(&self.store, world_pt) {
            self.input = InputState::dragging_from(world_pt);
            return Vec::new();
        }
        self.input = InputState::Idle;
        self.select_at(world_pt)
    }

    /// Pointer moved to `world_pt` during a drag.
    ///
    /// Motion accumulates per axis; each full cell of it attempts a one-cell
    /// move of the selected obstacle. The cell is consumed even when the move
    /// is blocked. Once a step is blocked, later steps the same way are too,
    /// so the rest of that axis is dropped without trying.
    pub fn drag_to(&mut self, world_pt: Point) -> Vec<Action> {
        let InputState::Dragging { last_world, mut accum_dx, mut accum_dy } = self.input else {
            return Vec::new();
        };
        if !world_pt.is_finite() {
            warn!(x = world_pt.x, y = world_pt.y, "ignoring non-finite pointer");
            return Vec::new();
        }
        let Some(index) = self.store.selected_index() else {
            return Vec::new();
        };
        accum_dx += world_pt.x - last_world.x;
        accum_dy += world_pt.y - last_world.y;

        let grid = *self.store.grid();
        let steps_x = take_steps(&mut accum_dx, grid.cell_size(), grid.cols());
        let steps_y = take_steps(&mut accum_dy, grid.cell_size(), grid.rows());

        let mut actions = Vec::new();
        for (count, cx, cy) in [(steps_x, steps_x.signum(), 0), (steps_y, 0, steps_y.signum())] {
            for _ in 0..count.unsigned_abs() {
                let moved = self.try_move(index, cx, cy);
                if moved.is_empty() {
                    break;
                }
                actions.extend(moved);
            }
        }
        self.input = InputState::Dragging { last_world: world_pt, accum_dx, accum_dy };

        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Pointer released or capture lost: drop the residue, leave the obstacle on its last cell.
    pub fn end_drag(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        Vec::new()
    }

    // --- Documents ---

    /// Snapshot the store as a map document stamped with the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns `Codec(EmptyMapName)` when the trimmed name is empty.
    pub fn export_document(&mut self, map_name: &str) -> Result<MapDocument, EngineError> {
        let doc = codec::to_document(&self.store, map_name, OffsetDateTime::now_utc())?;
        info!(map_name = %doc.map_name, obstacles = doc.obstacles.len(), "map exported");
        self.map_name = Some(doc.map_name.clone());
        Ok(doc)
    }

    /// Replace the store with a typed document's obstacles.
    pub fn import_document(&mut self, doc: &MapDocument) -> Vec<Action> {
        let store = codec::from_document(doc, *self.store.grid());
        self.replace_store(store, Some(doc.map_name.clone()), 0)
    }

    /// Parse map text and replace the store with its obstacles.
    ///
    /// # Errors
    ///
    /// Returns `Codec` when the text is not a usable map document; the current
    /// obstacles, selection and drag are left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<Vec<Action>, EngineError> {
        let parsed = codec::parse(text).inspect_err(|e| warn!(error = %e, "import rejected"))?;
        Ok(self.import_parsed(&parsed))
    }

    /// Replace the store with the obstacles of an already parsed map.
    pub fn import_parsed(&mut self, parsed: &ParsedMap) -> Vec<Action> {
        let store = codec::load_records(&parsed.records, *self.store.grid());
        self.replace_store(store, parsed.map_name.clone(), parsed.skipped)
    }

    fn replace_store(&mut self, store: ObstacleStore, map_name: Option<String>, skipped: usize) -> Vec<Action> {
        let loaded = store.len();
        self.store = store;
        self.input = InputState::Idle;
        if map_name.is_some() {
            self.map_name = map_name;
        }
        debug!(loaded, skipped, "store replaced from document");
        vec![Action::DocumentLoaded { loaded, skipped }, Action::SelectionChanged(None), Action::RenderNeeded]
    }

    // --- Viewport ---

    /// Record where the canvas is displayed in client space.
    pub fn set_viewport(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.viewport = Viewport::new(left, top, width, height);
    }

    /// Convert a client-space pointer position to world coordinates.
    #[must_use]
    pub fn client_to_world(&self, client: Point) -> Point {
        self.viewport.to_world(client, self.store.grid())
    }

    // --- Queries ---

    /// The currently selected obstacle index, if any.
    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.store.selected_index()
    }

    #[must_use]
    pub fn obstacle(&self, index: usize) -> Option<&Obstacle> {
        self.store.get(index)
    }

    /// Name from the last import or export.
    #[must_use]
    pub fn map_name(&self) -> Option<&str> {
        self.map_name.as_deref()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.store.grid()
    }
}
