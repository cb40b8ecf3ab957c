//! The per-session status overlay.
//!
//! Statuses are only ever inserted. Every mutator checks its ids against
//! the compiled dungeon first, so the overlay never names anything the
//! dungeon does not contain.

use std::collections::{BTreeMap, BTreeSet};

use dv_core::{DoorId, Dungeon, NoteId, RoomId};
use dv_encounters::{Agent, AgentClass};
use serde::{Deserialize, Serialize};

use crate::action::{Action, SoftError};
use crate::error::{EngineError, EngineResult};

/// Status of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorStatus {
    /// A secret door has been found.
    Discovered,
    /// A one-way or keyed door has been unlocked.
    Unlocked,
    /// The door has been passed through.
    Open,
}

/// Status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// The player has been here.
    Visited,
    /// A search came up empty.
    Searched,
}

/// Status of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStatus {
    /// Its contents have been taken.
    Searched,
    /// The curious feature has fired.
    Used,
    /// The feature no longer exists.
    Gone,
}

/// Overlay for one door.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoorState {
    /// Accumulated statuses.
    pub statuses: BTreeSet<DoorStatus>,
}

/// Overlay for one room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    /// Accumulated statuses.
    pub statuses: BTreeSet<RoomStatus>,
    /// Per-note statuses.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<NoteId, BTreeSet<NoteStatus>>,
    /// Agents placed here at the start.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<AgentClass>,
}

/// The mutable state of one play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current room.
    pub room: RoomId,
    /// Turn counter, 1 after `init`.
    pub turn: u32,
    /// The action that produced this state.
    pub action: Option<Action>,
    /// Message for the player.
    pub message: String,
    /// Player mistake, if the input was not understood.
    pub error: Option<SoftError>,
    /// Whether the session is over.
    pub end: bool,
    /// Door overlay.
    pub doors: BTreeMap<DoorId, DoorState>,
    /// Room overlay.
    pub rooms: BTreeMap<RoomId, RoomState>,
    /// Items carried, in pickup order.
    pub inventory: Vec<String>,
}

impl GameState {
    /// A fresh state standing in `room`.
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            turn: 0,
            action: None,
            message: String::new(),
            error: None,
            end: false,
            doors: BTreeMap::new(),
            rooms: BTreeMap::new(),
            inventory: Vec::new(),
        }
    }

    /// Clear per-transition fields.
    pub fn reset_transient(&mut self) {
        self.action = None;
        self.message.clear();
        self.error = None;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether a door has a status.
    pub fn door_has(&self, door: DoorId, status: DoorStatus) -> bool {
        self.doors
            .get(&door)
            .is_some_and(|d| d.statuses.contains(&status))
    }

    /// Whether a room has a status.
    pub fn room_has(&self, room: RoomId, status: RoomStatus) -> bool {
        self.rooms
            .get(&room)
            .is_some_and(|r| r.statuses.contains(&status))
    }

    /// Whether a note in a room has a status.
    pub fn note_has(&self, room: RoomId, note: NoteId, status: NoteStatus) -> bool {
        self.rooms
            .get(&room)
            .and_then(|r| r.notes.get(&note))
            .is_some_and(|s| s.contains(&status))
    }

    /// Statuses of a door, in declaration order.
    pub fn door_statuses(&self, door: DoorId) -> Vec<DoorStatus> {
        self.doors
            .get(&door)
            .map(|d| d.statuses.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Statuses of a room, in declaration order.
    pub fn room_statuses(&self, room: RoomId) -> Vec<RoomStatus> {
        self.rooms
            .get(&room)
            .map(|r| r.statuses.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Agents present in a room.
    pub fn agents_in(&self, room: RoomId) -> &[AgentClass] {
        self.rooms
            .get(&room)
            .map(|r| r.agents.as_slice())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Checked inserts
    // -----------------------------------------------------------------------

    /// Add a status to a door.
    pub fn mark_door(
        &mut self,
        dungeon: &Dungeon,
        door: DoorId,
        status: DoorStatus,
    ) -> EngineResult<()> {
        if dungeon.door(door).is_none() {
            return Err(EngineError::UnknownDoor(door));
        }
        self.doors.entry(door).or_default().statuses.insert(status);
        Ok(())
    }

    /// Add a status to a room.
    pub fn mark_room(
        &mut self,
        dungeon: &Dungeon,
        room: RoomId,
        status: RoomStatus,
    ) -> EngineResult<()> {
        if dungeon.room(room).is_none() {
            return Err(EngineError::UnknownRoom(room));
        }
        self.rooms.entry(room).or_default().statuses.insert(status);
        Ok(())
    }

    /// Add a status to a note; the note must belong to the room.
    pub fn mark_note(
        &mut self,
        dungeon: &Dungeon,
        room: RoomId,
        note: NoteId,
        status: NoteStatus,
    ) -> EngineResult<()> {
        let compiled = dungeon.room(room).ok_or(EngineError::UnknownRoom(room))?;
        let known = !note_is_continuation(note) && compiled.notes.iter().any(|n| n.id == note);
        if !known {
            return Err(EngineError::UnknownNote { room, note });
        }
        self.rooms
            .entry(room)
            .or_default()
            .notes
            .entry(note)
            .or_default()
            .insert(status);
        Ok(())
    }

    /// Record an agent's presence.
    pub fn place_agent(&mut self, dungeon: &Dungeon, agent: &Agent) -> EngineResult<()> {
        if dungeon.room(agent.room).is_none() {
            return Err(EngineError::UnknownRoom(agent.room));
        }
        self.rooms.entry(agent.room).or_default().agents.push(agent.class);
        Ok(())
    }
}

fn note_is_continuation(note: NoteId) -> bool {
    note == NoteId::CONTINUATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::{Note, NoteKind, Point, Rect, Room, RoomKind};

    fn dungeon() -> Dungeon {
        let room = Room {
            id: RoomId(0),
            kind: RoomKind::SmallRoom,
            description: String::new(),
            area: String::new(),
            exits: Vec::new(),
            notes: vec![Note {
                id: NoteId(4),
                text: "Dust.".to_string(),
                pos: Point::default(),
                reference: String::new(),
                kind: NoteKind::Plain,
            }],
            rect: Rect::new(0, 0, 2, 2),
        };
        Dungeon::new("", "", vec![room], Vec::new(), RoomId(0))
    }

    #[test]
    fn statuses_accumulate() {
        let d = dungeon();
        let mut s = GameState::new(RoomId(0));
        s.mark_room(&d, RoomId(0), RoomStatus::Visited).unwrap();
        s.mark_room(&d, RoomId(0), RoomStatus::Searched).unwrap();
        s.mark_room(&d, RoomId(0), RoomStatus::Visited).unwrap();
        assert_eq!(
            s.room_statuses(RoomId(0)),
            vec![RoomStatus::Visited, RoomStatus::Searched]
        );
        s.mark_note(&d, RoomId(0), NoteId(4), NoteStatus::Searched).unwrap();
        assert!(s.note_has(RoomId(0), NoteId(4), NoteStatus::Searched));
        assert!(!s.note_has(RoomId(0), NoteId(4), NoteStatus::Used));
    }

    #[test]
    fn unknown_ids_are_fatal() {
        let d = dungeon();
        let mut s = GameState::new(RoomId(0));
        assert!(matches!(
            s.mark_room(&d, RoomId(3), RoomStatus::Visited),
            Err(EngineError::UnknownRoom(RoomId(3)))
        ));
        assert!(matches!(
            s.mark_door(&d, DoorId(1), DoorStatus::Open),
            Err(EngineError::UnknownDoor(DoorId(1)))
        ));
        assert!(matches!(
            s.mark_note(&d, RoomId(0), NoteId(9), NoteStatus::Used),
            Err(EngineError::UnknownNote { .. })
        ));
        assert!(matches!(
            s.mark_note(&d, RoomId(0), NoteId::CONTINUATION, NoteStatus::Used),
            Err(EngineError::UnknownNote { .. })
        ));
        assert!(s.rooms.is_empty() && s.doors.is_empty());
    }

    #[test]
    fn agents_recorded_per_room() {
        let d = dungeon();
        let mut s = GameState::new(RoomId(0));
        s.place_agent(&d, &Agent::new(AgentClass::Peon, RoomId(0))).unwrap();
        assert_eq!(s.agents_in(RoomId(0)), &[AgentClass::Peon]);
        assert!(s.place_agent(&d, &Agent::new(AgentClass::Boss, RoomId(8))).is_err());
    }

    #[test]
    fn reset_clears_transient_fields_only() {
        let mut s = GameState::new(RoomId(0));
        s.message = "hello".to_string();
        s.action = Some(Action::Search);
        s.inventory.push("a key".to_string());
        s.reset_transient();
        assert!(s.message.is_empty() && s.action.is_none());
        assert_eq!(s.inventory.len(), 1);
    }
}
