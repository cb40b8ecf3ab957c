//! Room bucket analysis.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use dv_core::{Destination, DoorKind, Dungeon, Exit, NoteKind, Room, RoomId};

/// Area (in cells) at or above which a room is very large.
pub const VERY_LARGE_AREA: i32 = 64;
/// Area at or above which a room is large.
pub const LARGE_AREA: i32 = 30;
/// Area at or above which a room is medium.
pub const MEDIUM_AREA: i32 = 12;

/// Rooms partitioned into placement buckets. Every list is in id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Rooms of at least [`VERY_LARGE_AREA`] cells.
    pub very_large: Vec<RoomId>,
    /// Rooms of at least [`LARGE_AREA`] cells.
    pub large: Vec<RoomId>,
    /// Rooms of at least [`MEDIUM_AREA`] cells.
    pub medium: Vec<RoomId>,
    /// Rooms without notes.
    pub empty: Vec<RoomId>,
    /// Rooms reachable only through a secret, one-way, or keyed door.
    pub locked: Vec<RoomId>,
    /// Rooms holding containers, stashes, or item-bearing notes.
    pub treasure: Vec<RoomId>,
    /// Rooms reachable from the start through plain passages.
    pub unlocked: Vec<RoomId>,
    /// Treasure rooms whose loot sits in a secret stash.
    pub secret_treasure: BTreeSet<RoomId>,
    /// The final chamber, if marked.
    pub ending: Option<RoomId>,
    /// Area per room.
    pub areas: BTreeMap<RoomId, i32>,
    /// Number of exits per room.
    pub exit_counts: BTreeMap<RoomId, usize>,
}

impl Analysis {
    /// Area of a room, zero if unknown.
    pub fn area(&self, room: RoomId) -> i32 {
        self.areas.get(&room).copied().unwrap_or(0)
    }

    /// Exit count of a room, zero if unknown.
    pub fn exits(&self, room: RoomId) -> usize {
        self.exit_counts.get(&room).copied().unwrap_or(0)
    }

    /// Whether a room is in the locked bucket.
    pub fn is_locked(&self, room: RoomId) -> bool {
        self.locked.contains(&room)
    }
}

/// Whether an exit can be taken without finding, unbolting, or unlocking anything.
fn is_free(exit: &Exit) -> bool {
    let keyed = exit.kind == DoorKind::Double
        && matches!(
            exit.note.as_ref().map(|n| &n.kind),
            Some(NoteKind::Door {
                keyholes: Some(_),
                ..
            })
        );
    exit.kind != DoorKind::Secret && !exit.kind.is_one_way() && !keyed
}

fn is_treasure(room: &Room) -> bool {
    room.notes.iter().any(|n| {
        matches!(n.kind, NoteKind::Container { .. } | NoteKind::Secret { .. }) || !n.items().is_empty()
    })
}

fn free_reach(dungeon: &Dungeon) -> BTreeSet<RoomId> {
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::new();
    if dungeon.room(dungeon.start()).is_some() {
        seen.insert(dungeon.start());
        queue.push_back(dungeon.start());
    }
    while let Some(id) = queue.pop_front() {
        let Some(room) = dungeon.room(id) else {
            continue;
        };
        for exit in room.exits.iter().filter(|e| is_free(e)) {
            if let Destination::Room(next) = exit.to {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}

/// Partition a dungeon's rooms into placement buckets.
///
/// Passages (hallways, bends, junctions) are never sized as rooms.
pub fn analyze(dungeon: &Dungeon) -> Analysis {
    let reach = free_reach(dungeon);
    let mut analysis = Analysis {
        ending: dungeon.ending().map(|r| r.id),
        ..Analysis::default()
    };

    for room in dungeon.rooms() {
        let id = room.id;
        let area = room.rect.area();
        analysis.areas.insert(id, area);
        analysis.exit_counts.insert(id, room.exits.len());

        if !room.kind.is_passage() {
            if area >= VERY_LARGE_AREA {
                analysis.very_large.push(id);
            } else if area >= LARGE_AREA {
                analysis.large.push(id);
            } else if area >= MEDIUM_AREA {
                analysis.medium.push(id);
            }
        }

        if room.notes.is_empty() {
            analysis.empty.push(id);
        }
        if is_treasure(room) {
            analysis.treasure.push(id);
            if room
                .notes
                .iter()
                .any(|n| matches!(n.kind, NoteKind::Secret { .. }))
            {
                analysis.secret_treasure.insert(id);
            }
        }
        if reach.contains(&id) {
            analysis.unlocked.push(id);
        } else {
            analysis.locked.push(id);
        }
    }

    tracing::debug!(
        rooms = dungeon.room_count(),
        locked = analysis.locked.len(),
        treasure = analysis.treasure.len(),
        "analyzed dungeon"
    );
    analysis
}
