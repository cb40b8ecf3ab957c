use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::door::{Door, DoorId};
use crate::error::{DvError, DvResult};
use crate::room::{Exit, Room, RoomId};

/// The compiled dungeon graph. Read-only once built; share it with `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "DungeonParts")]
pub struct Dungeon {
    /// Dungeon title.
    pub title: String,
    /// Introductory story text.
    pub story: String,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    start: RoomId,

    // Indexes
    #[serde(skip)]
    room_index: HashMap<RoomId, usize>,
    #[serde(skip)]
    door_index: HashMap<DoorId, usize>,
}

#[derive(Deserialize)]
struct DungeonParts {
    title: String,
    story: String,
    rooms: Vec<Room>,
    doors: Vec<Door>,
    start: RoomId,
}

impl From<DungeonParts> for Dungeon {
    fn from(parts: DungeonParts) -> Self {
        Dungeon::new(parts.title, parts.story, parts.rooms, parts.doors, parts.start)
    }
}

impl Dungeon {
    /// Assemble a dungeon and build its id indexes.
    pub fn new(
        title: impl Into<String>,
        story: impl Into<String>,
        rooms: Vec<Room>,
        doors: Vec<Door>,
        start: RoomId,
    ) -> Self {
        let room_index = rooms.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        let door_index = doors.iter().enumerate().map(|(i, d)| (d.id, i)).collect();
        Self {
            title: title.into(),
            story: story.into(),
            rooms,
            doors,
            start,
            room_index,
            door_index,
        }
    }

    /// Load a compiled dungeon exported as JSON.
    pub fn from_json(source: &str) -> DvResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a room by ID.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.room_index.get(&id).map(|&i| &self.rooms[i])
    }

    /// Get a room by ID, failing on unknown ids.
    pub fn get_room(&self, id: RoomId) -> DvResult<&Room> {
        self.room(id).ok_or(DvError::RoomNotFound(id))
    }

    /// Get a door by ID.
    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.door_index.get(&id).map(|&i| &self.doors[i])
    }

    /// Get a door by ID, failing on unknown ids.
    pub fn get_door(&self, id: DoorId) -> DvResult<&Door> {
        self.door(id).ok_or(DvError::DoorNotFound(id))
    }

    /// All rooms in id order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All doors in id order.
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// The room a new session starts in.
    pub fn start(&self) -> RoomId {
        self.start
    }

    /// The final chamber, if the document marks one.
    pub fn ending(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.is_ending())
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of doors.
    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    // -----------------------------------------------------------------------
    // Ordering
    // -----------------------------------------------------------------------

    /// Clockwise angle of an exit's door around the room's origin corner.
    ///
    /// North-side doors come first, then east, south, and west.
    pub fn exit_angle(&self, room: &Room, exit: &Exit) -> f64 {
        match self.door(exit.door) {
            Some(door) => {
                let dx = f64::from(door.x - room.rect.x);
                let dy = f64::from(door.y - room.rect.y);
                dy.atan2(dx)
            }
            None => f64::MAX,
        }
    }

    /// Sort exits clockwise; ties keep their original order.
    pub fn sort_clockwise(&self, room: &Room, exits: &mut [&Exit]) {
        exits.sort_by(|a, b| {
            self.exit_angle(room, a)
                .total_cmp(&self.exit_angle(room, b))
        });
    }
}
