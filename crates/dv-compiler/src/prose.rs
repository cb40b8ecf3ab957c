//! Room and exit prose.

use dv_core::text::capitalize;
use dv_core::{Destination, DoorKind, Point, Rect, RandomSource, RoomKind};

const FLOURISHES: &[&str] = &[
    "The water is ice cold and smells of rot.",
    "Something moves beneath the dark surface.",
    "Ripples spread out from a dripping crack in the ceiling.",
    "A thin film of slime floats on the water.",
    "Your footsteps echo across the still water.",
];

/// Noun phrase for a room from its shape and number of doors.
pub fn room_kind(rect: &Rect, door_count: usize) -> RoomKind {
    if rect.is_unit() {
        return match door_count {
            0 | 1 => RoomKind::Alcove,
            2 => RoomKind::Bend,
            3 => RoomKind::Junction,
            _ => RoomKind::Intersection,
        };
    }
    if rect.rotunda {
        return RoomKind::RoundRoom;
    }
    if rect.w == 1 || rect.h == 1 {
        return match rect.w.max(rect.h) {
            ..=3 => RoomKind::ShortHallway,
            4..=6 => RoomKind::Hallway,
            _ => RoomKind::LongHallway,
        };
    }
    if rect.w == rect.h {
        return match rect.w {
            ..=3 => RoomKind::SmallRoom,
            4..=6 => RoomKind::Room,
            _ => RoomKind::LargeRoom,
        };
    }
    if rect.area() <= 24 {
        RoomKind::Chamber
    } else {
        RoomKind::Hall
    }
}

/// Floor size as "W by H feet".
pub fn area(rect: &Rect, cell_feet: u32) -> String {
    let feet = |cells: i32| i64::from(cells) * i64::from(cell_feet);
    format!("{} by {} feet", feet(rect.w), feet(rect.h))
}

/// Small counts spelled out, larger ones as digits.
pub fn number_word(n: usize) -> String {
    const WORDS: &[&str] = &[
        "no", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve",
    ];
    WORDS
        .get(n)
        .map(|w| (*w).to_string())
        .unwrap_or_else(|| n.to_string())
}

fn count_inside(rect: &Rect, points: &[Point]) -> usize {
    points.iter().filter(|p| rect.contains_point(**p)).count()
}

/// Sentence describing the columns inside a room, if any.
pub fn columns(rect: &Rect, points: &[Point]) -> Option<String> {
    let n = count_inside(rect, points);
    match n {
        0 => None,
        1 => Some("A single column supports the ceiling.".to_string()),
        _ if rect.rotunda => Some(format!(
            "A ring of {} columns surrounds the center of the room.",
            number_word(n)
        )),
        _ => Some(format!(
            "Two rows of columns, {} in all, run the length of the room.",
            number_word(n)
        )),
    }
}

/// Sentence describing standing water, with a flourish on heavy flooding.
pub fn water(
    rect: &Rect,
    points: &[Point],
    flourish_threshold: usize,
    rng: &mut dyn RandomSource,
) -> Option<String> {
    let flooded = count_inside(rect, points);
    if flooded == 0 {
        return None;
    }
    let coverage = flooded as f64 / f64::from(rect.area().max(1));
    let band = if coverage < 0.25 {
        "Puddles of water dot the floor."
    } else if coverage < 0.5 {
        "Part of the floor is flooded."
    } else if coverage < 1.0 {
        "Most of the floor is under water."
    } else {
        "The room is completely flooded."
    };
    if flooded >= flourish_threshold {
        let flourish = FLOURISHES[rng.index(FLOURISHES.len())];
        Some(format!("{band} {flourish}"))
    } else {
        Some(band.to_string())
    }
}

/// Full room description.
pub fn describe_room(kind: RoomKind, rect: &Rect, extra: &[String]) -> String {
    let mut parts = vec![format!("You are in {}.", kind.noun_phrase())];
    if rect.ending {
        parts.push("A heavy silence tells you this is the heart of the dungeon.".to_string());
    }
    parts.extend(extra.iter().cloned());
    parts.join(" ")
}

/// Exit clause ("a door leads to a small room"), without the direction.
pub fn exit_clause(kind: DoorKind, facing: bool, to: Destination, dest: Option<RoomKind>) -> String {
    let place = match (to, dest) {
        (Destination::Outside, _) => "the outside",
        (Destination::Room(_), Some(kind)) => kind.noun_phrase(),
        (Destination::Room(_), None) => "another room",
    };
    match kind {
        DoorKind::Open => format!("an open archway leads to {place}"),
        DoorKind::Door => format!("a door leads to {place}"),
        DoorKind::Narrow => format!("a narrow crack leads to {place}"),
        DoorKind::DungeonExit if to == Destination::Outside => {
            "the entrance leads out of the dungeon".to_string()
        }
        DoorKind::DungeonExit => format!("the entrance leads to {place}"),
        DoorKind::Portcullis if facing => format!("a lowered portcullis bars the way to {place}"),
        DoorKind::Portcullis => format!("a portcullis with a winch on this side leads to {place}"),
        DoorKind::Double => format!("a double door leads to {place}"),
        DoorKind::Secret if facing => format!("a secret door leads to {place}"),
        DoorKind::Secret => format!("a concealed door, plain to see from this side, leads to {place}"),
        DoorKind::Steel if facing => format!("a steel door, bolted from the other side, leads to {place}"),
        DoorKind::Steel => format!("a steel door with a heavy bolt on this side leads to {place}"),
        DoorKind::StairsDown => format!("stairs descend to {place}"),
        DoorKind::Stairwell => format!("a stairwell leads to {place}"),
    }
}

/// Exit clause as a standalone sentence ("To the east, a door leads ...").
pub fn exit_sentence(label: &str, clause: &str) -> String {
    capitalize(&format!("to the {label}, {clause}."))
}
