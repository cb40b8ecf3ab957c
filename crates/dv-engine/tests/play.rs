//! End-to-end play through compiled dungeons.

use std::sync::Arc;

use dv_compiler::{CompilerConfig, compile_seeded};
use dv_core::document::{DoorRecord, NoteRecord, Offset};
use dv_core::Direction::{East, North, West};
use dv_core::{DoorId, Dungeon, DungeonDocument, Point, Rect, RoomId};
use dv_engine::{Action, DoorStatus, Output, RoomStatus, Session};
use proptest::prelude::*;

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

fn build(doc: DungeonDocument) -> Arc<Dungeon> {
    let result = compile_seeded(&doc, &CompilerConfig::default());
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    Arc::new(result.dungeon)
}

/// Room 0 east to room 2 through a plain door; room 2's only other exit
/// is a secret door north to the outside, hidden from inside.
fn secret_exit() -> Arc<Dungeon> {
    build(DungeonDocument {
        rects: vec![
            Rect::new(0, 0, 3, 3),
            Rect::new(3, 1, 1, 1),
            Rect::new(4, 0, 3, 3),
            Rect::new(5, -1, 1, 1),
        ],
        doors: vec![door(3, 1, (1, 0), 1), door(5, -1, (0, -1), 6)],
        ..DungeonDocument::default()
    })
}

fn labels(out: &Output) -> Vec<&str> {
    out.exits.iter().map(|e| e.label.as_str()).collect()
}

#[test]
fn two_room_escape() {
    let mut session = Session::new(secret_exit());

    let out = session.act(Action::Init).unwrap();
    assert_eq!(out.room, RoomId(0));
    assert_eq!(labels(&out), vec!["east"]);

    let out = session.act(Action::Go(East)).unwrap();
    assert_eq!(out.room, RoomId(2));
    assert_eq!(labels(&out), vec!["west"]);

    let out = session.act(Action::Search).unwrap();
    assert_eq!(out.message, "You discover a secret door to the north!");
    assert_eq!(labels(&out), vec!["north", "west"]);
    assert_eq!(out.exits[0].statuses, vec![DoorStatus::Discovered]);

    let out = session.act(Action::Go(North)).unwrap();
    assert_eq!(out.message, "You leave the dungeon.");
    assert!(out.end);
    assert_eq!(out.turn, 4);
}

#[test]
fn hidden_secret_door_cannot_be_used() {
    let mut session = Session::new(secret_exit());
    session.act(Action::Init).unwrap();
    session.act(Action::Go(East)).unwrap();
    let before = session.state().cloned().unwrap();

    let out = session.step("north").unwrap();
    assert_eq!(out.message, "You cannot go that way.");
    let after = session.state().unwrap();
    assert_eq!(after.turn, before.turn + 1);
    assert_eq!(after.room, before.room);
    assert_eq!(after.doors, before.doors);
    assert_eq!(after.rooms, before.rooms);
    assert_eq!(after.inventory, before.inventory);
}

#[test]
fn keyed_double_door() {
    let dungeon = build(DungeonDocument {
        rects: vec![
            Rect::new(0, 0, 3, 3),
            Rect::new(3, 1, 1, 1),
            Rect::new(4, 0, 3, 3),
        ],
        doors: vec![door(3, 1, (1, 0), 5)],
        notes: vec![
            note(
                "The double door to the east can only be opened with a small brass key.",
                2.5,
                1.5,
            ),
            note("An oak chest contains a small brass key.", 0.5, 0.5),
        ],
        ..DungeonDocument::default()
    });
    let mut session = Session::new(dungeon);
    session.act(Action::Init).unwrap();

    let out = session.act(Action::Go(East)).unwrap();
    assert_eq!(out.message, "The double door is locked.");
    assert_eq!(out.room, RoomId(0));

    let out = session.act(Action::Search).unwrap();
    assert_eq!(out.message, "You open the oak chest and find a small brass key.");
    assert_eq!(out.inventory, vec!["a small brass key".to_string()]);

    let out = session.act(Action::Go(East)).unwrap();
    assert_eq!(out.room, RoomId(2));
    assert_eq!(out.message, "You unlock the double door.");
    assert_eq!(out.inventory.len(), 1);

    session.act(Action::Go(West)).unwrap();
    let out = session.act(Action::Go(East)).unwrap();
    assert_eq!(out.room, RoomId(2));
    assert_eq!(out.message, "");
    assert!(out.exits[0].statuses.contains(&DoorStatus::Open));
}

#[test]
fn picked_up_items_leave_the_room_prose() {
    let dungeon = build(DungeonDocument {
        rects: vec![Rect::new(0, 0, 3, 3)],
        notes: vec![note("On the altar lies a golden chalice.", 1.0, 1.0)],
        ..DungeonDocument::default()
    });
    let mut session = Session::new(dungeon);
    let out = session.act(Action::Init).unwrap();
    assert!(out.description.contains("golden chalice"));

    let out = session.act(Action::Search).unwrap();
    assert_eq!(out.message, "You find a golden chalice.");
    assert_eq!(out.inventory, vec!["a golden chalice".to_string()]);
    assert_eq!(out.description, "You are in a small room.");

    let out = session.act(Action::Search).unwrap();
    assert_eq!(out.message, "You find nothing else of interest.");
    assert_eq!(out.description, "You are in a small room.");
}

#[test]
fn container_prose_changes_after_search() {
    let dungeon = build(DungeonDocument {
        rects: vec![Rect::new(0, 0, 3, 3)],
        notes: vec![note("A rotting barrel holds salted fish.", 1.0, 1.0)],
        ..DungeonDocument::default()
    });
    let mut session = Session::new(dungeon);
    let out = session.act(Action::Init).unwrap();
    assert!(out.description.contains("There is a rotting barrel here."));
    let out = session.act(Action::Search).unwrap();
    assert!(out.description.contains("There is an empty rotting barrel here."));
}

/// A room holding whichever of a chest, a stash, and a corpse are enabled.
fn stocked(chest: bool, stash: bool, corpse: bool) -> Arc<Dungeon> {
    let mut notes = Vec::new();
    if chest {
        notes.push(note("An iron chest contains a dagger.", 0.5, 0.5));
    }
    if stash {
        notes.push(note("Hidden behind a tapestry is a silver ring.", 1.5, 0.5));
    }
    if corpse {
        notes.push(note("A dead knight clutching a shield.", 2.5, 0.5));
    }
    build(DungeonDocument {
        rects: vec![Rect::new(0, 0, 3, 3)],
        notes,
        ..DungeonDocument::default()
    })
}

/// One-way door: room 0 is the bolt side, room 2 the facing side.
fn steel_pair() -> Arc<Dungeon> {
    build(DungeonDocument {
        rects: vec![
            Rect::new(4, 0, 3, 3),
            Rect::new(3, 1, 1, 1),
            Rect::new(0, 0, 3, 3),
        ],
        doors: vec![door(3, 1, (1, 0), 7)],
        ..DungeonDocument::default()
    })
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Go(East)),
        Just(Action::Go(West)),
        Just(Action::Exit(1)),
        Just(Action::Search),
        Just(Action::Noop),
    ]
}

proptest! {
    #[test]
    fn exhausted_search_is_idempotent(
        chest in any::<bool>(),
        stash in any::<bool>(),
        corpse in any::<bool>(),
        extra in 2usize..6,
    ) {
        let mut session = Session::new(stocked(chest, stash, corpse));
        session.act(Action::Init).unwrap();
        let finds = usize::from(chest) + usize::from(stash) + usize::from(corpse);
        for _ in 0..finds {
            let out = session.act(Action::Search).unwrap();
            prop_assert!(out.message.starts_with("You "));
            prop_assert!(!out.statuses.contains(&RoomStatus::Searched));
        }

        let expected = if finds == 0 {
            "You find nothing of interest."
        } else {
            "You find nothing else of interest."
        };
        let first = session.act(Action::Search).unwrap();
        prop_assert_eq!(&first.message, expected);
        for _ in 0..extra {
            let again = session.act(Action::Search).unwrap();
            prop_assert_eq!(&again.message, expected);
            prop_assert_eq!(&again.statuses, &first.statuses);
            prop_assert_eq!(&again.inventory, &first.inventory);
            prop_assert_eq!(&again.description, &first.description);
            prop_assert!(again.statuses.contains(&RoomStatus::Searched));
        }
        prop_assert_eq!(first.inventory.len(), finds);
    }

    #[test]
    fn open_one_way_doors_stay_open(actions in prop::collection::vec(action(), 1..30)) {
        let mut session = Session::new(steel_pair());
        session.act(Action::Init).unwrap();
        for action in actions {
            let before = session.state().cloned().unwrap();
            let was_open = before.door_has(DoorId(1), DoorStatus::Open);
            let out = session.act(action).unwrap();
            let through_door = matches!(
                (before.room, action),
                (RoomId(0), Action::Go(West) | Action::Exit(1))
                    | (RoomId(2), Action::Go(East) | Action::Exit(1))
            );
            if was_open && through_door {
                prop_assert_ne!(out.room, before.room);
                prop_assert!(!out.message.contains("will not open"));
                prop_assert!(!out.message.contains("bolt"));
            }
            if was_open {
                let state = session.state().unwrap();
                prop_assert!(state.door_has(DoorId(1), DoorStatus::Open));
                prop_assert!(state.door_has(DoorId(1), DoorStatus::Unlocked));
            }
        }
    }
}
