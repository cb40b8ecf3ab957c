//! The geometry compiler.
//!
//! Compilation runs in four passes over the document:
//! 1. **Door pass**: match door records to their 1x1 connector cells
//! 2. **Adjacency pass**: find which door cells touch which rooms, and on what side
//! 3. **Note pass**: classify each note and file it under the room containing it
//! 4. **Room pass**: generate prose and exits, attach door notes, pick the start room

use std::collections::BTreeMap;

use dv_core::document::DungeonDocument;
use dv_core::{
    Destination, Direction, Door, DoorId, DoorKind, Dungeon, Exit, Note, NoteId, NoteKind,
    RandomSource, Room, RoomId, RoomKind,
};

use crate::config::CompilerConfig;
use crate::diagnostics::{Diagnostic, Severity};
use crate::prose;

/// Result of compiling a document into a dungeon.
#[derive(Debug, Clone)]
pub struct CompileResult {
    /// The compiled dungeon (best effort if the document had anomalies).
    pub dungeon: Dungeon,
    /// Anomalies found while compiling.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileResult {
    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Warning diagnostics only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Compile a document into a dungeon graph.
///
/// Never fails: anomalies are repaired on a best-effort basis and reported
/// as warnings. Output depends only on the document, the configuration and
/// the random source.
pub fn compile(
    doc: &DungeonDocument,
    config: &CompilerConfig,
    rng: &mut dyn RandomSource,
) -> CompileResult {
    let mut compiler = Compiler::new(doc, config);
    let dungeon = compiler.compile(rng);
    tracing::debug!(
        rooms = dungeon.room_count(),
        doors = dungeon.door_count(),
        diagnostics = compiler.diagnostics.len(),
        "compiled dungeon"
    );
    CompileResult {
        dungeon,
        diagnostics: compiler.diagnostics,
    }
}

fn warn(diagnostics: &mut Vec<Diagnostic>, label: String, message: String) {
    tracing::warn!(subject = %label, "{message}");
    diagnostics.push(Diagnostic::warning(message).with_label(label));
}

struct Compiler<'a> {
    doc: &'a DungeonDocument,
    config: &'a CompilerConfig,
    diagnostics: Vec<Diagnostic>,
    doors: BTreeMap<DoorId, Door>,
    room_ids: Vec<RoomId>,

    // Adjacency
    sides: BTreeMap<RoomId, Vec<(DoorId, Direction)>>,
    neighbours: BTreeMap<DoorId, Vec<RoomId>>,
    kinds: BTreeMap<RoomId, RoomKind>,
    notes: BTreeMap<RoomId, Vec<Note>>,
}

impl<'a> Compiler<'a> {
    fn new(doc: &'a DungeonDocument, config: &'a CompilerConfig) -> Self {
        Self {
            doc,
            config,
            diagnostics: Vec::new(),
            doors: BTreeMap::new(),
            room_ids: Vec::new(),
            sides: BTreeMap::new(),
            neighbours: BTreeMap::new(),
            kinds: BTreeMap::new(),
            notes: BTreeMap::new(),
        }
    }

    fn compile(&mut self, rng: &mut dyn RandomSource) -> Dungeon {
        self.collect_doors();
        self.connect();
        self.place_notes();

        let rooms: Vec<Room> = self
            .room_ids
            .clone()
            .into_iter()
            .map(|id| self.build_room(id, rng))
            .collect();
        let start = self.start_room(&rooms);
        let doors = self.doors.values().cloned().collect();
        Dungeon::new(
            self.doc.title.clone(),
            self.doc.story.clone(),
            rooms,
            doors,
            start,
        )
    }

    // -----------------------------------------------------------------------
    // Pass 1: doors
    // -----------------------------------------------------------------------

    fn collect_doors(&mut self) {
        let doc = self.doc;
        for (n, record) in doc.doors.iter().enumerate() {
            let label = format!("door record {n}");
            let cell = doc
                .rects
                .iter()
                .position(|r| r.is_unit() && r.x == record.x && r.y == record.y);
            let Some(index) = cell else {
                warn(
                    &mut self.diagnostics,
                    label,
                    format!("no 1x1 rect at ({}, {})", record.x, record.y),
                );
                continue;
            };

            let id = DoorId(index);
            if self.doors.contains_key(&id) {
                warn(
                    &mut self.diagnostics,
                    label,
                    format!("rect {index} already has a door"),
                );
                continue;
            }

            let kind = match DoorKind::from_code(record.code) {
                Some(kind) => kind,
                None => {
                    warn(
                        &mut self.diagnostics,
                        label,
                        format!("unknown door type {}, treated as a plain door", record.code),
                    );
                    DoorKind::Door
                }
            };

            self.doors.insert(
                id,
                Door {
                    id,
                    x: record.x,
                    y: record.y,
                    dir: (record.dir.x, record.dir.y),
                    kind,
                },
            );
        }
    }

    // -----------------------------------------------------------------------
    // Pass 2: adjacency
    // -----------------------------------------------------------------------

    fn connect(&mut self) {
        let doc = self.doc;
        for (i, rect) in doc.rects.iter().enumerate() {
            if self.doors.contains_key(&DoorId(i)) {
                continue;
            }
            let room = RoomId(i);
            let mut sides = Vec::new();
            for door in self.doors.values() {
                if let Some(side) = rect.side_of(door.x, door.y) {
                    sides.push((door.id, side));
                    self.neighbours.entry(door.id).or_default().push(room);
                }
            }
            self.kinds.insert(room, prose::room_kind(rect, sides.len()));
            self.sides.insert(room, sides);
            self.room_ids.push(room);
        }

        for id in self.doors.keys() {
            let count = self.neighbours.get(id).map_or(0, Vec::len);
            if count == 0 {
                warn(
                    &mut self.diagnostics,
                    format!("door {id}"),
                    "door cell touches no room".to_string(),
                );
            } else if count > 2 {
                warn(
                    &mut self.diagnostics,
                    format!("door {id}"),
                    format!("door cell touches {count} rooms, exits from the others lead to the first"),
                );
            }
        }
    }

    /// Where an exit through `door` leads when taken from `from`.
    fn destination(&self, door: DoorId, from: RoomId) -> Destination {
        self.neighbours
            .get(&door)
            .and_then(|rooms| rooms.iter().copied().find(|r| *r != from))
            .map_or(Destination::Outside, Destination::Room)
    }

    // -----------------------------------------------------------------------
    // Pass 3: notes
    // -----------------------------------------------------------------------

    fn place_notes(&mut self) {
        let doc = self.doc;
        for (n, record) in doc.notes.iter().enumerate() {
            let home = self
                .room_ids
                .iter()
                .copied()
                .find(|id| doc.rects[id.0].contains_point(record.pos));
            let Some(room) = home else {
                warn(
                    &mut self.diagnostics,
                    format!("note {n}"),
                    format!(
                        "note at ({}, {}) lies outside every room",
                        record.pos.x, record.pos.y
                    ),
                );
                continue;
            };
            let note = dv_notes::classify_record(NoteId(n), record);
            tracing::trace!(note = n, %room, kind = note.kind.tag(), "placed note");
            self.notes.entry(room).or_default().extend(note.flatten());
        }
    }

    // -----------------------------------------------------------------------
    // Pass 4: rooms
    // -----------------------------------------------------------------------

    fn build_room(&mut self, id: RoomId, rng: &mut dyn RandomSource) -> Room {
        let doc = self.doc;
        let rect = doc.rects[id.0];
        let kind = self.kinds.get(&id).copied().unwrap_or(RoomKind::Room);

        let mut extra = Vec::new();
        extra.extend(prose::columns(&rect, &doc.columns));
        extra.extend(prose::water(
            &rect,
            &doc.water,
            self.config.flourish_threshold,
            rng,
        ));

        let mut exits = Vec::new();
        for &(door_id, towards) in self.sides.get(&id).into_iter().flatten() {
            let Some(door) = self.doors.get(&door_id) else {
                continue;
            };
            let to = self.destination(door_id, id);
            let facing = door.is_facing(towards);
            let dest_kind = match to {
                Destination::Room(r) => self.kinds.get(&r).copied(),
                Destination::Outside => None,
            };
            exits.push(Exit {
                towards,
                to,
                facing,
                door: door_id,
                kind: door.kind,
                description: prose::exit_clause(door.kind, facing, to, dest_kind),
                note: None,
            });
        }

        let notes = self.notes.remove(&id).unwrap_or_default();
        attach_door_notes(&mut exits, &notes);

        Room {
            id,
            kind,
            description: prose::describe_room(kind, &rect, &extra),
            area: prose::area(&rect, self.config.cell_feet),
            exits,
            notes,
            rect,
        }
    }

    fn start_room(&mut self, rooms: &[Room]) -> RoomId {
        let entrance = rooms.iter().find(|r| {
            r.exits
                .iter()
                .any(|e| e.kind == DoorKind::DungeonExit)
        });
        match (entrance, rooms.first()) {
            (Some(room), _) => room.id,
            (None, Some(first)) => first.id,
            (None, None) => {
                warn(
                    &mut self.diagnostics,
                    "dungeon".to_string(),
                    "document has no rooms".to_string(),
                );
                RoomId(0)
            }
        }
    }
}

/// Direction of a door note: `None` if not a door note, `Some(None)` if undirected.
fn door_direction(note: &Note) -> Option<Option<Direction>> {
    match &note.kind {
        NoteKind::Door { direction, .. } => Some(*direction),
        _ => None,
    }
}

/// Attach door notes to double-door exits: by matching direction, else
/// the first undirected note goes to the first unmatched double door.
fn attach_door_notes(exits: &mut [Exit], notes: &[Note]) {
    let mut undirected_used = false;
    for exit in exits.iter_mut().filter(|e| e.kind == DoorKind::Double) {
        let directed = notes
            .iter()
            .find(|n| door_direction(n) == Some(Some(exit.towards)));
        let note = match directed {
            Some(n) => Some(n),
            None if !undirected_used => {
                let n = notes.iter().find(|n| door_direction(n) == Some(None));
                undirected_used = n.is_some();
                n
            }
            None => None,
        };
        exit.note = note.cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::document::{DoorRecord, NoteRecord, Offset};
    use dv_core::{Point, Rect};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn door(x: i32, y: i32, dir: (i32, i32), code: u8) -> DoorRecord {
        DoorRecord {
            x,
            y,
            dir: Offset { x: dir.0, y: dir.1 },
            code,
        }
    }

    fn note(text: &str, x: f64, y: f64) -> NoteRecord {
        NoteRecord {
            text: text.to_string(),
            reference: String::new(),
            pos: Point::new(x, y),
        }
    }

    /// Room 0 (3x3) with the entrance on its north side, a plain door east
    /// into room 2 (3x3, the ending).
    fn two_rooms() -> DungeonDocument {
        DungeonDocument {
            title: "Two Rooms".to_string(),
            rects: vec![
                Rect::new(0, 0, 3, 3),
                Rect::new(3, 1, 1, 1),
                Rect {
                    ending: true,
                    ..Rect::new(4, 0, 3, 3)
                },
                Rect::new(1, -1, 1, 1),
            ],
            doors: vec![door(3, 1, (1, 0), 1), door(1, -1, (0, 1), 3)],
            ..DungeonDocument::default()
        }
    }

    fn run(doc: &DungeonDocument) -> CompileResult {
        let mut rng = StdRng::seed_from_u64(42);
        compile(doc, &CompilerConfig::default(), &mut rng)
    }

    #[test]
    fn rooms_and_doors_keep_rect_ids() {
        let result = run(&two_rooms());
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        let d = &result.dungeon;
        let ids: Vec<RoomId> = d.rooms().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RoomId(0), RoomId(2)]);
        assert!(d.door(DoorId(1)).is_some());
        assert!(d.door(DoorId(3)).is_some());
        assert_eq!(d.start(), RoomId(0));
        assert_eq!(d.ending().map(|r| r.id), Some(RoomId(2)));
    }

    #[test]
    fn exits_follow_adjacency() {
        let result = run(&two_rooms());
        let first = result.dungeon.room(RoomId(0)).unwrap();
        assert_eq!(first.exits.len(), 2);

        let east = &first.exits[0];
        assert_eq!(east.towards, Direction::East);
        assert_eq!(east.to, Destination::Room(RoomId(2)));
        assert!(east.facing);
        assert_eq!(east.description, "a door leads to a small room");

        let north = &first.exits[1];
        assert_eq!(north.towards, Direction::North);
        assert_eq!(north.to, Destination::Outside);
        assert_eq!(north.kind, DoorKind::DungeonExit);
        assert!(!north.facing);

        let second = result.dungeon.room(RoomId(2)).unwrap();
        assert_eq!(second.exits.len(), 1);
        assert_eq!(second.exits[0].towards, Direction::West);
        assert_eq!(second.exits[0].to, Destination::Room(RoomId(0)));
        assert!(!second.exits[0].facing);
    }

    #[test]
    fn room_prose_and_area() {
        let result = run(&two_rooms());
        let room = result.dungeon.room(RoomId(0)).unwrap();
        insta::assert_snapshot!(room.description, @"You are in a small room.");
        assert_eq!(room.area, "15 by 15 feet");
        let ending = result.dungeon.room(RoomId(2)).unwrap();
        assert!(ending.description.contains("heart of the dungeon"));
    }

    #[test]
    fn unknown_door_code_degrades_to_plain_door() {
        let mut doc = two_rooms();
        doc.doors[0].code = 42;
        let result = run(&doc);
        assert!(!result.has_errors());
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.dungeon.door(DoorId(1)).unwrap().kind, DoorKind::Door);
    }

    #[test]
    fn door_record_without_cell_is_dropped() {
        let mut doc = two_rooms();
        doc.doors.push(door(50, 50, (1, 0), 1));
        let result = run(&doc);
        assert_eq!(result.dungeon.door_count(), 2);
        assert!(result.diagnostics[0].to_string().contains("no 1x1 rect at (50, 50)"));
    }

    #[test]
    fn unit_rect_without_door_is_a_room() {
        let mut doc = two_rooms();
        doc.rects.push(Rect::new(-1, 1, 1, 1));
        let result = run(&doc);
        let alcove = result.dungeon.room(RoomId(4)).unwrap();
        assert_eq!(alcove.kind, RoomKind::Alcove);
        assert!(alcove.exits.is_empty());
    }

    #[test]
    fn ambiguous_door_cell_warns_and_first_wins() {
        let doc = DungeonDocument {
            rects: vec![
                Rect::new(0, 0, 2, 1),
                Rect::new(2, 0, 1, 1),
                Rect::new(3, 0, 2, 1),
                Rect::new(2, 1, 2, 2),
            ],
            doors: vec![door(2, 0, (1, 0), 1)],
            ..DungeonDocument::default()
        };
        let result = run(&doc);
        let warnings: Vec<_> = result.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "door cell touches 3 rooms, exits from the others lead to the first"
        );
        let right = result.dungeon.room(RoomId(2)).unwrap();
        assert_eq!(right.exits[0].to, Destination::Room(RoomId(0)));
        let below = result.dungeon.room(RoomId(3)).unwrap();
        assert_eq!(below.exits[0].towards, Direction::North);
        assert_eq!(below.exits[0].to, Destination::Room(RoomId(0)));
    }

    #[test]
    fn notes_placed_classified_and_flattened() {
        let mut doc = two_rooms();
        doc.notes = vec![
            note("An oak chest holds a lantern.", 1.5, 1.5),
            note(
                "The rear entrance is blocked by rubble. A barrel contains salted fish.",
                5.0,
                1.0,
            ),
            note("Far away.", 100.0, 100.0),
        ];
        let result = run(&doc);
        assert_eq!(result.warnings().count(), 1);

        let first = result.dungeon.room(RoomId(0)).unwrap();
        assert_eq!(first.notes.len(), 1);
        assert!(matches!(first.notes[0].kind, NoteKind::Container { .. }));

        let second = result.dungeon.room(RoomId(2)).unwrap();
        assert_eq!(second.notes.len(), 2);
        assert!(second.notes[0].is_continuation());
        assert_eq!(second.notes[1].id, NoteId(1));
    }

    #[test]
    fn door_notes_attach_to_double_doors() {
        let mut doc = two_rooms();
        doc.doors[0].code = 5;
        doc.notes = vec![note(
            "The double door to the east can only be opened with two iron keys.",
            2.0,
            1.0,
        )];
        let result = run(&doc);
        let room = result.dungeon.room(RoomId(0)).unwrap();
        let east = &room.exits[0];
        assert_eq!(east.kind, DoorKind::Double);
        let Some(Note {
            kind: NoteKind::Door { keyholes, .. },
            ..
        }) = &east.note
        else {
            panic!("expected door note");
        };
        assert_eq!(keyholes.as_deref(), Some("two iron keys"));
        assert!(room.exits[1].note.is_none());
    }

    #[test]
    fn start_falls_back_to_first_room() {
        let mut doc = two_rooms();
        doc.doors.pop();
        doc.rects.pop();
        let result = run(&doc);
        assert_eq!(result.dungeon.start(), RoomId(0));
    }

    #[test]
    fn empty_document_warns() {
        let result = run(&DungeonDocument::default());
        assert_eq!(result.dungeon.room_count(), 0);
        assert_eq!(result.warnings().count(), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn compilation_is_deterministic(seed in any::<u64>(), flooded in 0usize..9) {
                let mut doc = two_rooms();
                doc.water = (0..flooded)
                    .map(|i| Point::new((i % 3) as f64, (i / 3) as f64))
                    .collect();
                let config = CompilerConfig::default().with_seed(seed);
                let a = compile(&doc, &config, &mut StdRng::seed_from_u64(seed));
                let b = compile(&doc, &config, &mut StdRng::seed_from_u64(seed));
                prop_assert_eq!(a.dungeon.rooms(), b.dungeon.rooms());
                prop_assert_eq!(a.dungeon.start(), b.dungeon.start());
            }
        }
    }
}
