//! The raw dungeon document consumed by the compiler.
//!
//! Every collection keeps its input order: rect and note ids are positional
//! and leak into player-facing output, so reordering a document changes the
//! dungeon.

use serde::{Deserialize, Serialize};

use crate::error::DvResult;
use crate::geometry::{Point, Rect};

/// A door record: position, facing, and numeric type code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorRecord {
    /// Cell column.
    pub x: i32,
    /// Cell row.
    pub y: i32,
    /// Facing side as a unit offset.
    pub dir: Offset,
    /// Door type code (see [`crate::DoorKind::from_code`]).
    #[serde(rename = "type", default)]
    pub code: u8,
}

/// Integer grid offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

/// A free-text annotation anchored on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Annotation sentence.
    pub text: String,
    /// Map label.
    #[serde(rename = "ref", default)]
    pub reference: String,
    /// Anchor position.
    pub pos: Point,
}

/// A complete dungeon document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonDocument {
    /// Document format version.
    pub version: String,
    /// Dungeon title.
    pub title: String,
    /// Introductory story.
    pub story: String,
    /// Rooms and door cells, in id order.
    pub rects: Vec<Rect>,
    /// Door records.
    pub doors: Vec<DoorRecord>,
    /// Annotations, in id order.
    pub notes: Vec<NoteRecord>,
    /// Column positions.
    pub columns: Vec<Point>,
    /// Flooded cells.
    pub water: Vec<Point>,
}

impl DungeonDocument {
    /// Parse a document from JSON text.
    pub fn from_json(source: &str) -> DvResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}
