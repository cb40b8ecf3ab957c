//! State transitions.
//!
//! Every transition resets the transient fields, dispatches on the action,
//! and advances the turn counter. The dungeon is never touched; only the
//! returned overlay changes.

use dv_core::text::{decapitalize, items_sentence};
use dv_core::{CuriousEffect, Destination, Direction, DoorKind, Dungeon, Exit, NoteKind, Room};
use dv_notes::{key_count, keys_required};

use crate::action::{Action, SoftError};
use crate::error::{EngineError, EngineResult};
use crate::output::visible_exits;
use crate::state::{DoorStatus, GameState, NoteStatus, RoomStatus};

/// Message once the session has ended.
pub const OVER: &str = "The adventure is over.";
/// Message when no visible exit matches.
pub const NO_WAY: &str = "You cannot go that way.";
/// Message when the player steps outside.
pub const LEFT: &str = "You leave the dungeon.";
/// Message on `quit`.
pub const ABANDONED: &str = "You abandon your quest.";

/// Apply an action to a state.
///
/// `state` is `None` before the session starts; the only legal action then
/// is `init`. A later `init` is a no-op.
pub fn transition(
    dungeon: &Dungeon,
    state: Option<&GameState>,
    action: Action,
) -> EngineResult<GameState> {
    let Some(prev) = state else {
        return match action {
            Action::Init => init(dungeon),
            _ => Err(EngineError::NotStarted),
        };
    };

    let mut next = prev.clone();
    next.reset_transient();
    next.action = Some(action);

    if prev.end {
        next.message = OVER.to_string();
        return Ok(next);
    }

    match action {
        Action::Init | Action::Noop => {}
        Action::Go(dir) => {
            let room = current(dungeon, &next)?;
            let exit = visible_exits(dungeon, room, &next)
                .into_iter()
                .find(|e| e.towards == dir);
            go(dungeon, &mut next, exit)?;
        }
        Action::Exit(n) => {
            let room = current(dungeon, &next)?;
            let exit = visible_exits(dungeon, room, &next)
                .into_iter()
                .nth(usize::from(n).saturating_sub(1));
            go(dungeon, &mut next, exit)?;
        }
        Action::Search => search(dungeon, &mut next)?,
        Action::Use => use_feature(dungeon, &mut next)?,
        Action::Quit => {
            next.message = ABANDONED.to_string();
            next.end = true;
        }
    }

    next.turn += 1;
    tracing::debug!(turn = next.turn, room = %next.room, %action, end = next.end, "transition");
    Ok(next)
}

/// Record a player mistake. The turn still advances.
pub fn reject(state: &GameState, error: SoftError) -> GameState {
    let mut next = state.clone();
    next.reset_transient();
    next.message = error.to_string();
    next.error = Some(error);
    if !next.end {
        next.turn += 1;
    }
    next
}

fn init(dungeon: &Dungeon) -> EngineResult<GameState> {
    let mut state = GameState::new(dungeon.start());
    state.mark_room(dungeon, dungeon.start(), RoomStatus::Visited)?;
    state.action = Some(Action::Init);
    state.message = dungeon.story.clone();
    state.turn = 1;
    tracing::debug!(start = %dungeon.start(), "session started");
    Ok(state)
}

fn current<'a>(dungeon: &'a Dungeon, state: &GameState) -> EngineResult<&'a Room> {
    dungeon
        .room(state.room)
        .ok_or(EngineError::UnknownRoom(state.room))
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

fn go(dungeon: &Dungeon, state: &mut GameState, exit: Option<&Exit>) -> EngineResult<()> {
    let Some(exit) = exit else {
        state.message = NO_WAY.to_string();
        return Ok(());
    };
    let door = dungeon
        .door(exit.door)
        .ok_or(EngineError::UnknownDoor(exit.door))?;
    let mut messages = Vec::new();

    if exit.kind.is_one_way() && !is_unlocked(state, exit) {
        if exit.facing {
            state.message = format!("The {} will not open from this side.", door.kind.noun());
            return Ok(());
        }
        state.mark_door(dungeon, door.id, DoorStatus::Unlocked)?;
        messages.push(match exit.kind {
            DoorKind::Portcullis => "You crank the winch and the portcullis rises.".to_string(),
            _ => format!("You draw back the bolt of the {}.", door.kind.noun()),
        });
    }

    if let Some((noun, keyholes)) = keyhole_note(exit) {
        if !is_unlocked(state, exit) {
            let needed = keys_required(keyholes);
            let carried: usize = state.inventory.iter().map(|i| key_count(i)).sum();
            if carried < needed {
                state.message = format!("The {noun} is locked.");
                return Ok(());
            }
            state.mark_door(dungeon, door.id, DoorStatus::Unlocked)?;
            messages.push(format!("You unlock the {noun}."));
        }
    }

    state.mark_door(dungeon, door.id, DoorStatus::Open)?;
    match exit.to {
        Destination::Outside => {
            messages.push(LEFT.to_string());
            state.end = true;
        }
        Destination::Room(next) => {
            state.mark_room(dungeon, next, RoomStatus::Visited)?;
            state.room = next;
        }
    }
    state.message = messages.join(" ");
    Ok(())
}

fn is_unlocked(state: &GameState, exit: &Exit) -> bool {
    state.door_has(exit.door, DoorStatus::Unlocked) || state.door_has(exit.door, DoorStatus::Open)
}

/// Door noun and keyhole text of a keyed double door.
fn keyhole_note(exit: &Exit) -> Option<(&str, &str)> {
    if exit.kind != DoorKind::Double {
        return None;
    }
    match exit.note.as_ref().map(|n| &n.kind) {
        Some(NoteKind::Door {
            door,
            keyholes: Some(keyholes),
            ..
        }) => Some((door.as_str(), keyholes.as_str())),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// What a search can turn up, in priority order.
enum Find<'a> {
    Note(&'a dv_core::Note),
    SecretDoor(&'a Exit),
}

fn next_find<'a>(room: &'a Room, state: &GameState) -> Option<Find<'a>> {
    let unsearched = |n: &&dv_core::Note| {
        !n.is_continuation() && !state.note_has(room.id, n.id, NoteStatus::Searched)
    };
    let container = room
        .notes
        .iter()
        .filter(unsearched)
        .find(|n| matches!(n.kind, NoteKind::Container { .. }));
    let bearing = || {
        room.notes.iter().filter(unsearched).find(|n| {
            matches!(n.kind, NoteKind::Remains { .. } | NoteKind::Annotated { .. })
                && !n.items().is_empty()
        })
    };
    let secret = || {
        room.notes
            .iter()
            .filter(unsearched)
            .find(|n| matches!(n.kind, NoteKind::Secret { .. }))
    };
    let door = || {
        room.exits
            .iter()
            .find(|e| e.is_hidden_secret() && !state.door_has(e.door, DoorStatus::Discovered))
    };

    container
        .or_else(bearing)
        .or_else(secret)
        .map(Find::Note)
        .or_else(|| door().map(Find::SecretDoor))
}

/// Whether a search of this room could ever find anything.
fn has_searchables(room: &Room) -> bool {
    let notes = room.notes.iter().any(|n| match n.kind {
        NoteKind::Container { .. } | NoteKind::Secret { .. } => true,
        NoteKind::Remains { .. } | NoteKind::Annotated { .. } => !n.items().is_empty(),
        _ => false,
    });
    notes || room.exits.iter().any(Exit::is_hidden_secret)
}

fn search(dungeon: &Dungeon, state: &mut GameState) -> EngineResult<()> {
    let room = current(dungeon, state)?;
    match next_find(room, state) {
        Some(Find::Note(note)) => {
            state.mark_note(dungeon, room.id, note.id, NoteStatus::Searched)?;
            state.inventory.extend(note.items().iter().cloned());
            state.message = match &note.kind {
                NoteKind::Container { message, .. }
                | NoteKind::Secret { message, .. }
                | NoteKind::Remains { message, .. } => message.clone(),
                _ => format!("You find {}.", items_sentence(note.items())),
            };
        }
        Some(Find::SecretDoor(exit)) => {
            state.mark_door(dungeon, exit.door, DoorStatus::Discovered)?;
            state.message = secret_door_message(exit.towards);
        }
        None => {
            state.mark_room(dungeon, room.id, RoomStatus::Searched)?;
            state.message = if has_searchables(room) {
                "You find nothing else of interest.".to_string()
            } else {
                "You find nothing of interest.".to_string()
            };
        }
    }
    Ok(())
}

fn secret_door_message(towards: Direction) -> String {
    format!("You discover a secret door to the {}!", towards.name())
}

// ---------------------------------------------------------------------------
// Use
// ---------------------------------------------------------------------------

fn use_feature(dungeon: &Dungeon, state: &mut GameState) -> EngineResult<()> {
    let room = current(dungeon, state)?;
    let feature = room.notes.iter().find_map(|n| match &n.kind {
        NoteKind::Curious {
            imperative,
            resolution,
            items,
            effect,
            ..
        } if !state.note_has(room.id, n.id, NoteStatus::Used)
            && !state.note_has(room.id, n.id, NoteStatus::Gone) =>
        {
            Some((n, imperative, resolution, items, effect))
        }
        _ => None,
    });
    let Some((note, imperative, resolution, items, effect)) = feature else {
        let any = room
            .notes
            .iter()
            .any(|n| matches!(n.kind, NoteKind::Curious { .. }));
        state.message = if any {
            "There is nothing else to use here.".to_string()
        } else {
            "There is nothing to use here.".to_string()
        };
        return Ok(());
    };

    state.mark_note(dungeon, room.id, note.id, NoteStatus::Used)?;
    state.inventory.extend(items.iter().cloned());
    let act = decapitalize(imperative.trim_end_matches('.'));
    state.message = format!("You {act}. {resolution}");

    match effect {
        CuriousEffect::None => {}
        CuriousEffect::Gone => {
            state.mark_note(dungeon, room.id, note.id, NoteStatus::Gone)?;
        }
        CuriousEffect::Teleport => {
            let start = dungeon.start();
            state.mark_room(dungeon, start, RoomStatus::Visited)?;
            state.room = start;
        }
    }
    Ok(())
}
