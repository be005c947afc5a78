//! Map document codec: canonical obstacle fields in, canonical obstacle fields out.
//!
//! DESIGN
//! ======
//! Only `type`, `anchorPoint`, `rotationAngle` and `anchor` are written per
//! obstacle. Vertices are never persisted; on load every obstacle is rebuilt
//! by the shape factory, so any vertex data found in older or foreign files
//! is ignored.
//!
//! Loading is tolerant per entry and strict per document. A file without an
//! `obstacles` array fails as a whole. A malformed entry inside an otherwise
//! valid file is skipped and counted.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

use crate::doc::ObstacleStore;
use crate::geometry::{Point, normalize_angle};
use crate::grid::Grid;
use crate::shape::{AnchorTag, Archetype};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map document must be a JSON object")]
    NotAnObject,
    #[error("map document has no obstacles array")]
    MissingObstacles,
    #[error("map name must not be empty")]
    EmptyMapName,
}

impl CodecError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Json(_) => "E_INVALID_JSON",
            Self::NotAnObject => "E_NOT_AN_OBJECT",
            Self::MissingObstacles => "E_MISSING_OBSTACLES",
            Self::EmptyMapName => "E_EMPTY_MAP_NAME",
        }
    }
}

// =============================================================================
// TYPES
// =============================================================================

/// Canonical fields of one obstacle as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleRecord {
    #[serde(rename = "type")]
    pub archetype: Archetype,
    pub anchor_point: Point,
    pub rotation_angle: f64,
    pub anchor: AnchorTag,
}

/// The persisted map file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    pub map_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub obstacles: Vec<ObstacleRecord>,
}

/// Result of leniently parsing map text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMap {
    /// `mapName`, when present and a string.
    pub map_name: Option<String>,
    /// `createdAt`, when present and valid RFC 3339.
    pub created_at: Option<OffsetDateTime>,
    /// Entries that carried a known type and a numeric anchor point.
    pub records: Vec<ObstacleRecord>,
    /// Entries that were dropped.
    pub skipped: usize,
}

// =============================================================================
// ENCODE
// =============================================================================

/// Snapshot the store's canonical fields into a document.
///
/// The name is trimmed.
///
/// # Errors
///
/// Returns `EmptyMapName` when the trimmed name is empty.
pub fn to_document(store: &ObstacleStore, map_name: &str, created_at: OffsetDateTime) -> Result<MapDocument, CodecError> {
    let map_name = map_name.trim();
    if map_name.is_empty() {
        return Err(CodecError::EmptyMapName);
    }
    let obstacles = store
        .obstacles()
        .iter()
        .map(|o| ObstacleRecord {
            archetype: o.archetype(),
            anchor_point: o.anchor_point(),
            rotation_angle: o.rotation_angle(),
            anchor: o.anchor(),
        })
        .collect();
    Ok(MapDocument { map_name: map_name.to_string(), created_at, obstacles })
}

/// Pretty-print a document with two-space indentation.
///
/// # Errors
///
/// Returns `Json` if serialization fails (e.g. a timestamp outside the RFC 3339 range).
pub fn to_json(doc: &MapDocument) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

// =============================================================================
// DECODE
// =============================================================================

/// Build a store on `grid` from a typed document, regenerating all geometry.
#[must_use]
pub fn from_document(doc: &MapDocument, grid: Grid) -> ObstacleStore {
    load_records(&doc.obstacles, grid)
}

/// Build a store on `grid` from canonical records.
///
/// Anchor points snap to the nearest grid intersection and angles are normalized.
#[must_use]
pub fn load_records(records: &[ObstacleRecord], grid: Grid) -> ObstacleStore {
    let mut store = ObstacleStore::new(grid);
    for record in records {
        let (gx, gy) = grid.snap(record.anchor_point);
        store.push_canonical(
            record.archetype,
            grid.to_world(gx, gy),
            normalize_angle(record.rotation_angle),
            record.anchor,
        );
    }
    store
}

/// Parse map text, keeping every well-formed obstacle entry.
///
/// # Errors
///
/// Returns `Json` for invalid JSON, `NotAnObject` when the top level is not an
/// object, and `MissingObstacles` when `obstacles` is absent or not an array.
pub fn parse(text: &str) -> Result<ParsedMap, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let root = value.as_object().ok_or(CodecError::NotAnObject)?;
    let entries = root
        .get("obstacles")
        .and_then(Value::as_array)
        .ok_or(CodecError::MissingObstacles)?;

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.iter().enumerate() {
        if let Some(record) = decode_entry(entry) {
            records.push(record);
        } else {
            warn!(index, "skipping malformed obstacle entry");
            skipped += 1;
        }
    }

    let map_name = root.get("mapName").and_then(Value::as_str).map(str::to_string);
    let created_at = root
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(parse_timestamp);
    info!(loaded = records.len(), skipped, "map document parsed");
    Ok(ParsedMap { map_name, created_at, records, skipped })
}

/// Decode one entry. Needs a known `type` and numeric `anchorPoint.x/y`;
/// `rotationAngle` defaults to 0 and `anchor` to `topLeft`.
fn decode_entry(entry: &Value) -> Option<ObstacleRecord> {
    let obj = entry.as_object()?;
    let kind = obj.get("type")?.as_str()?;
    let Ok(archetype) = kind.parse::<Archetype>() else {
        warn!(kind, "unknown obstacle type");
        return None;
    };
    let anchor_point = obj.get("anchorPoint")?;
    let x = anchor_point.get("x")?.as_f64()?;
    let y = anchor_point.get("y")?.as_f64()?;
    let rotation_angle = obj.get("rotationAngle").and_then(Value::as_f64).unwrap_or(0.0);
    let anchor = obj
        .get("anchor")
        .and_then(Value::as_str)
        .map(AnchorTag::parse_lenient)
        .unwrap_or_default();
    Some(ObstacleRecord { archetype, anchor_point: Point::new(x, y), rotation_angle, anchor })
}

fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    match OffsetDateTime::parse(raw, &Rfc3339) {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!(error = %e, raw, "ignoring unparseable createdAt");
            None
        }
    }
}
