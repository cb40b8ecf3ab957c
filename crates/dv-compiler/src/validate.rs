//! Structural validation of a compiled dungeon.
//!
//! Compilation repairs what it can and moves on; this pass reports what a
//! strict consumer would reject. It is separate so tools can choose.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use dv_core::document::DungeonDocument;
use dv_core::{Destination, DoorId, Dungeon, RoomId};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::compiler::compile;
use crate::config::CompilerConfig;

/// A warning or error found during validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// What the issue is about ("room 3", "door 7").
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate a compiled dungeon.
///
/// Exits must point at existing rooms and doors and the start room must
/// exist. Door cells shared by more than two rooms are errors; rooms
/// without exits, one-sided connections, and rooms unreachable from the
/// start are warnings.
pub fn validate(dungeon: &Dungeon) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if dungeon.room(dungeon.start()).is_none() {
        issues.push(ValidationIssue::error(
            "dungeon",
            format!("start room {} does not exist", dungeon.start()),
        ));
    }

    let mut users: BTreeMap<DoorId, BTreeSet<RoomId>> = BTreeMap::new();
    for room in dungeon.rooms() {
        validate_room_exits(dungeon, room.id, &mut users, &mut issues);
    }

    for door in dungeon.doors() {
        let count = users.get(&door.id).map_or(0, BTreeSet::len);
        if count == 0 {
            issues.push(ValidationIssue::warning(
                format!("door {}", door.id),
                "connects no rooms",
            ));
        } else if count > 2 {
            issues.push(ValidationIssue::error(
                format!("door {}", door.id),
                format!("touches {count} rooms"),
            ));
        }
    }

    if !dungeon.rooms().is_empty() && !has_way_out(dungeon) {
        issues.push(ValidationIssue::warning("dungeon", "no exit leads outside"));
    }

    let reachable = reachable_from_start(dungeon);
    for room in dungeon.rooms() {
        if !reachable.contains(&room.id) {
            issues.push(ValidationIssue::warning(
                format!("room {}", room.id),
                "unreachable from the start room",
            ));
        }
    }

    issues
}

fn validate_room_exits(
    dungeon: &Dungeon,
    id: RoomId,
    users: &mut BTreeMap<DoorId, BTreeSet<RoomId>>,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(room) = dungeon.room(id) else {
        return;
    };
    let subject = format!("room {id}");
    if room.exits.is_empty() {
        issues.push(ValidationIssue::warning(&subject, "has no exits"));
    }

    for exit in &room.exits {
        users.entry(exit.door).or_default().insert(id);

        match dungeon.door(exit.door) {
            None => issues.push(ValidationIssue::error(
                &subject,
                format!("exit {} uses unknown door {}", exit.towards, exit.door),
            )),
            Some(door) if room.rect.side_of(door.x, door.y) != Some(exit.towards) => {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!("door {} does not touch the {} wall", exit.door, exit.towards),
                ));
            }
            Some(_) => {}
        }

        let Destination::Room(target) = exit.to else {
            continue;
        };
        match dungeon.room(target) {
            None => issues.push(ValidationIssue::error(
                &subject,
                format!("exit {} leads to unknown room {target}", exit.towards),
            )),
            Some(other) if !other.exits.iter().any(|e| e.door == exit.door) => {
                issues.push(ValidationIssue::warning(
                    &subject,
                    format!("room {target} has no way back through door {}", exit.door),
                ));
            }
            Some(_) => {}
        }
    }
}

fn has_way_out(dungeon: &Dungeon) -> bool {
    dungeon
        .rooms()
        .iter()
        .flat_map(|r| &r.exits)
        .any(|e| e.to == Destination::Outside)
}

/// Rooms reachable from the start, ignoring locks and secrets.
fn reachable_from_start(dungeon: &Dungeon) -> BTreeSet<RoomId> {
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
        for exit in &room.exits {
            if let Destination::Room(next) = exit.to {
                if dungeon.room(next).is_some() && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}

/// Strict check of a document: compiler anomalies become errors, followed
/// by the structural checks on the compiled result.
pub fn validate_document(doc: &DungeonDocument, config: &CompilerConfig) -> Vec<ValidationIssue> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let result = compile(doc, config, &mut rng);
    let mut issues: Vec<ValidationIssue> = result
        .diagnostics
        .iter()
        .map(|d| {
            ValidationIssue::error(
                d.label.clone().unwrap_or_else(|| "document".to_string()),
                d.message.clone(),
            )
        })
        .collect();
    issues.extend(validate(&result.dungeon));
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::document::{DoorRecord, Offset};
    use dv_core::{Direction, Door, DoorKind, Exit, Rect, Room, RoomKind};

    fn room(id: usize, rect: Rect, exits: Vec<Exit>) -> Room {
        Room {
            id: RoomId(id),
            kind: RoomKind::SmallRoom,
            description: String::new(),
            area: String::new(),
            exits,
            notes: Vec::new(),
            rect,
        }
    }

    fn exit(towards: Direction, door: usize, to: Destination) -> Exit {
        Exit {
            towards,
            to,
            facing: false,
            door: DoorId(door),
            kind: DoorKind::Door,
            description: String::new(),
            note: None,
        }
    }

    fn door(id: usize, x: i32, y: i32) -> Door {
        Door {
            id: DoorId(id),
            x,
            y,
            dir: (1, 0),
            kind: DoorKind::Door,
        }
    }

    /// Room 0 --door 1--> room 2, room 0 --door 3--> outside.
    fn connected() -> Dungeon {
        let rooms = vec![
            room(
                0,
                Rect::new(0, 0, 3, 3),
                vec![
                    exit(Direction::East, 1, Destination::Room(RoomId(2))),
                    exit(Direction::North, 3, Destination::Outside),
                ],
            ),
            room(
                2,
                Rect::new(4, 0, 3, 3),
                vec![exit(Direction::West, 1, Destination::Room(RoomId(0)))],
            ),
        ];
        Dungeon::new("", "", rooms, vec![door(1, 3, 1), door(3, 1, -1)], RoomId(0))
    }

    #[test]
    fn well_formed_dungeon_has_no_issues() {
        let issues = validate(&connected());
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn missing_start_is_an_error() {
        let d = connected();
        let broken = Dungeon::new("", "", d.rooms().to_vec(), d.doors().to_vec(), RoomId(9));
        let issues = validate(&broken);
        assert!(issues.iter().any(|i| i.is_error && i.message.contains("start room 9")));
    }

    #[test]
    fn dangling_exit_targets_are_errors() {
        let rooms = vec![room(
            0,
            Rect::new(0, 0, 3, 3),
            vec![
                exit(Direction::East, 1, Destination::Room(RoomId(7))),
                exit(Direction::West, 5, Destination::Outside),
            ],
        )];
        let d = Dungeon::new("", "", rooms, vec![door(1, 3, 1)], RoomId(0));
        let errors: Vec<String> = validate(&d)
            .into_iter()
            .filter(|i| i.is_error)
            .map(|i| i.to_string())
            .collect();
        assert!(errors.iter().any(|e| e.contains("unknown room 7")));
        assert!(errors.iter().any(|e| e.contains("unknown door 5")));
    }

    #[test]
    fn isolated_room_warns() {
        let d = connected();
        let mut rooms = d.rooms().to_vec();
        rooms.push(room(5, Rect::new(20, 20, 2, 2), Vec::new()));
        let d = Dungeon::new("", "", rooms, d.doors().to_vec(), RoomId(0));
        let issues = validate(&d);
        assert!(issues.iter().all(|i| !i.is_error));
        assert!(issues.iter().any(|i| i.subject == "room 5" && i.message == "has no exits"));
        assert!(issues
            .iter()
            .any(|i| i.subject == "room 5" && i.message.contains("unreachable")));
    }

    #[test]
    fn issue_display() {
        let issue = ValidationIssue::warning("room 3", "has no exits");
        assert_eq!(issue.to_string(), "warning: room 3: has no exits");
    }

    #[test]
    fn document_anomalies_become_errors() {
        let doc = DungeonDocument {
            rects: vec![Rect::new(0, 0, 3, 3), Rect::new(3, 1, 1, 1)],
            doors: vec![DoorRecord {
                x: 3,
                y: 1,
                dir: Offset { x: 1, y: 0 },
                code: 99,
            }],
            ..DungeonDocument::default()
        };
        let issues = validate_document(&doc, &CompilerConfig::default());
        assert!(issues
            .iter()
            .any(|i| i.is_error && i.subject == "door record 0" && i.message.contains("unknown door type 99")));
    }
}
