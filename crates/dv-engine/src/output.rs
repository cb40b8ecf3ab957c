//! The player-facing output record.
//!
//! Rendering only ever reads the overlay: secret stashes, undiscovered
//! secret doors, and vanished features never appear here.

use std::collections::BTreeMap;

use dv_core::text::{capitalize, sentence};
use dv_core::{Destination, Direction, DoorId, DoorKind, Dungeon, Exit, Note, NoteKind, Room, RoomId};
use dv_encounters::AgentClass;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::state::{DoorStatus, GameState, NoteStatus, RoomStatus};

/// An exit as the player sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitView {
    /// Direction label, with an ordinal when several exits share a direction.
    pub label: String,
    /// Compass direction.
    pub towards: Direction,
    /// Target.
    pub to: Destination,
    /// Whether the door's facing side meets this approach.
    pub facing: bool,
    /// Door passed through.
    pub door: DoorId,
    /// Door kind.
    #[serde(rename = "type")]
    pub kind: DoorKind,
    /// Full sentence ("To the east, a door leads to a small room.").
    pub description: String,
    /// Door statuses from the overlay.
    pub statuses: Vec<DoorStatus>,
}

/// A "use" affordance for a curious feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imperative {
    /// What firing the feature means ("Pull the lever.").
    pub text: String,
    /// The canonical command that fires it.
    pub command: String,
}

/// Everything the player may know after a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// The action that was taken.
    pub action: Option<String>,
    /// Message for the player.
    pub message: String,
    /// Current room.
    pub room: RoomId,
    /// Room prose with visible notes.
    pub description: String,
    /// Room size.
    pub area: String,
    /// Visible exits, clockwise.
    pub exits: Vec<ExitView>,
    /// Whether the session is over.
    pub end: bool,
    /// Kind of player mistake (`"syntax"`), if any; `message` says what went wrong.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Turn counter.
    pub turn: u32,
    /// Statuses of the current room.
    pub statuses: Vec<RoomStatus>,
    /// Curious features that can still be used.
    pub imperatives: Vec<Imperative>,
    /// Items carried.
    pub inventory: Vec<String>,
    /// Agents in the current room.
    pub agents: Vec<AgentClass>,
}

/// Exits of `room` the player can see, in clockwise order.
///
/// A secret door seen from its hidden side stays out until discovered.
pub fn visible_exits<'a>(dungeon: &Dungeon, room: &'a Room, state: &GameState) -> Vec<&'a Exit> {
    let mut exits: Vec<&Exit> = room
        .exits
        .iter()
        .filter(|e| !e.is_hidden_secret() || state.door_has(e.door, DoorStatus::Discovered))
        .collect();
    dungeon.sort_clockwise(room, &mut exits);
    exits
}

/// Labels for exits in order: "east", or "east 1", "east 2" when shared.
pub fn exit_labels(exits: &[&Exit]) -> Vec<String> {
    let mut totals: BTreeMap<Direction, usize> = BTreeMap::new();
    for exit in exits {
        *totals.entry(exit.towards).or_default() += 1;
    }
    let mut seen: BTreeMap<Direction, usize> = BTreeMap::new();
    exits
        .iter()
        .map(|exit| {
            let name = exit.towards.name();
            if totals.get(&exit.towards).copied().unwrap_or(0) > 1 {
                let n = seen.entry(exit.towards).or_default();
                *n += 1;
                format!("{name} {n}")
            } else {
                name.to_string()
            }
        })
        .collect()
}

fn note_prose(room: RoomId, note: &Note, state: &GameState) -> Option<String> {
    let searched = state.note_has(room, note.id, NoteStatus::Searched);
    match &note.kind {
        NoteKind::Container { pristine, empty, .. } => {
            Some(if searched { empty.clone() } else { pristine.clone() })
        }
        NoteKind::Secret { .. } => None,
        NoteKind::Curious { feature, .. } => {
            if state.note_has(room, note.id, NoteStatus::Gone) {
                None
            } else {
                Some(sentence(&capitalize(feature)))
            }
        }
        NoteKind::Remains { body, .. } if searched => Some(sentence(&capitalize(body))),
        NoteKind::Annotated { items, .. } if searched && !items.is_empty() => None,
        NoteKind::More { .. } => None,
        _ if note.text.is_empty() => None,
        _ => Some(sentence(&note.text)),
    }
}

/// Room prose followed by whatever notes are visible.
pub fn describe(room: &Room, state: &GameState) -> String {
    std::iter::once(room.description.clone())
        .chain(room.notes.iter().filter_map(|n| note_prose(room.id, n, state)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Curious features not yet used and still present.
pub fn imperatives(room: &Room, state: &GameState) -> Vec<Imperative> {
    room.notes
        .iter()
        .filter(|n| {
            !state.note_has(room.id, n.id, NoteStatus::Used)
                && !state.note_has(room.id, n.id, NoteStatus::Gone)
        })
        .filter_map(|n| n.imperative())
        .map(|text| Imperative {
            text: text.to_string(),
            command: "use".to_string(),
        })
        .collect()
}

/// Build the output record for a state.
pub fn render(dungeon: &Dungeon, state: &GameState) -> EngineResult<Output> {
    let room = dungeon
        .room(state.room)
        .ok_or(EngineError::UnknownRoom(state.room))?;

    let visible = visible_exits(dungeon, room, state);
    let labels = exit_labels(&visible);
    let exits = visible
        .iter()
        .zip(labels)
        .map(|(exit, label)| ExitView {
            description: capitalize(&format!("to the {label}, {}.", exit.description)),
            label,
            towards: exit.towards,
            to: exit.to,
            facing: exit.facing,
            door: exit.door,
            kind: exit.kind,
            statuses: state.door_statuses(exit.door),
        })
        .collect();

    Ok(Output {
        action: state.action.map(|a| a.to_string()),
        message: state.message.clone(),
        room: room.id,
        description: describe(room, state),
        area: room.area.clone(),
        exits,
        end: state.end,
        error: state.error.as_ref().map(|e| e.tag().to_string()),
        turn: state.turn,
        statuses: state.room_statuses(room.id),
        imperatives: imperatives(room, state),
        inventory: state.inventory.clone(),
        agents: state.agents_in(room.id).to_vec(),
    })
}
