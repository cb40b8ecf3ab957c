use std::fmt;

use serde::{Deserialize, Serialize};

use crate::door::{DoorId, DoorKind};
use crate::geometry::{Direction, Rect};
use crate::note::Note;

/// Identifier of a room: the index of its rect in the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an exit leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// Another room.
    Room(RoomId),
    /// Out of the dungeon.
    Outside,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room(id) => write!(f, "{id}"),
            Self::Outside => f.write_str("outside"),
        }
    }
}

/// The shape-derived kind of a room, which decides its noun phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    /// 1x1 space with a single door.
    Alcove,
    /// 1x1 space joining two doors.
    Bend,
    /// 1x1 space joining three doors.
    Junction,
    /// 1x1 space joining four doors.
    Intersection,
    /// One cell wide, up to three long.
    ShortHallway,
    /// One cell wide, up to six long.
    Hallway,
    /// One cell wide, longer than six.
    LongHallway,
    /// A rotunda.
    RoundRoom,
    /// Square, up to 3x3.
    SmallRoom,
    /// Square, up to 6x6.
    Room,
    /// Square, larger than 6x6.
    LargeRoom,
    /// Oblong, up to 24 cells.
    Chamber,
    /// Oblong, larger than 24 cells.
    Hall,
}

impl RoomKind {
    /// Indefinite noun phrase ("an alcove", "a long hallway").
    pub fn noun_phrase(&self) -> &'static str {
        match self {
            Self::Alcove => "an alcove",
            Self::Bend => "a bend in the passage",
            Self::Junction => "a T-junction",
            Self::Intersection => "an intersection",
            Self::ShortHallway => "a short hallway",
            Self::Hallway => "a hallway",
            Self::LongHallway => "a long hallway",
            Self::RoundRoom => "a round room",
            Self::SmallRoom => "a small room",
            Self::Room => "a room",
            Self::LargeRoom => "a large room",
            Self::Chamber => "a chamber",
            Self::Hall => "a great hall",
        }
    }

    /// Connector spaces and hallways.
    pub fn is_passage(&self) -> bool {
        matches!(
            self,
            Self::Alcove
                | Self::Bend
                | Self::Junction
                | Self::Intersection
                | Self::ShortHallway
                | Self::Hallway
                | Self::LongHallway
        )
    }
}

/// A derived, directional connection from a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    /// Compass direction from the room.
    pub towards: Direction,
    /// Target of the exit.
    pub to: Destination,
    /// Whether the door's facing side meets this approach.
    pub facing: bool,
    /// Door cell the exit passes through.
    pub door: DoorId,
    /// Kind of that door.
    #[serde(rename = "type")]
    pub kind: DoorKind,
    /// Prose clause ("a door leads to a small room").
    pub description: String,
    /// Door annotation gating passage, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

impl Exit {
    /// Whether the exit is a secret door seen from its hidden side.
    pub fn is_hidden_secret(&self) -> bool {
        self.kind == DoorKind::Secret && self.facing
    }
}

/// A compiled room. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Rect index.
    pub id: RoomId,
    /// Shape-derived kind.
    pub kind: RoomKind,
    /// Generated prose.
    pub description: String,
    /// Generated size prose ("15 by 20 feet").
    pub area: String,
    /// Exits in rect order.
    pub exits: Vec<Exit>,
    /// Classified notes, continuations flattened.
    pub notes: Vec<Note>,
    /// Room geometry and flags.
    #[serde(flatten)]
    pub rect: Rect,
}

impl Room {
    /// Whether this is the dungeon's final chamber.
    pub fn is_ending(&self) -> bool {
        self.rect.ending
    }
}
