use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Direction;

/// Identifier of a door: the index of its 1x1 rect in the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoorId(pub usize);

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a door, in the order of the input document's type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorKind {
    /// An empty doorway.
    Open,
    /// An ordinary wooden door.
    Door,
    /// A narrow gap in the wall.
    Narrow,
    /// The way in and out of the dungeon.
    DungeonExit,
    /// A portcullis, raised from one side only.
    Portcullis,
    /// A double door, possibly keyed.
    Double,
    /// A concealed door, invisible from its facing side.
    Secret,
    /// A steel door, bolted from one side only.
    Steel,
    /// Stairs leading down.
    StairsDown,
    /// A stairwell.
    Stairwell,
}

impl DoorKind {
    /// Map an input document type code to a kind.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Door),
            2 => Some(Self::Narrow),
            3 => Some(Self::DungeonExit),
            4 => Some(Self::Portcullis),
            5 => Some(Self::Double),
            6 => Some(Self::Secret),
            7 => Some(Self::Steel),
            8 => Some(Self::StairsDown),
            9 => Some(Self::Stairwell),
            _ => None,
        }
    }

    /// Doors that open from one side only.
    pub fn is_one_way(&self) -> bool {
        matches!(self, Self::Steel | Self::Portcullis)
    }

    /// Short noun used in player messages ("the steel door").
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Open => "doorway",
            Self::Door => "door",
            Self::Narrow => "narrow passage",
            Self::DungeonExit => "dungeon entrance",
            Self::Portcullis => "portcullis",
            Self::Double => "double door",
            Self::Secret => "secret door",
            Self::Steel => "steel door",
            Self::StairsDown => "stairs",
            Self::Stairwell => "stairwell",
        }
    }
}

impl fmt::Display for DoorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A door occupying a 1x1 connector cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// Rect index of the connector cell.
    pub id: DoorId,
    /// Cell column.
    pub x: i32,
    /// Cell row.
    pub y: i32,
    /// Side of the cell the door faces, as a unit offset.
    pub dir: (i32, i32),
    /// Door kind.
    pub kind: DoorKind,
}

impl Door {
    /// Whether an approach heading `towards` meets the door's facing side.
    pub fn is_facing(&self, towards: Direction) -> bool {
        self.dir == towards.offset()
    }
}
