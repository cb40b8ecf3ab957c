//! Classification of a sentence into a note kind.
//!
//! The winning pattern's captured group set decides the kind, in this order:
//!
//! 1. exactly `{container, item}` is a container;
//! 2. exactly `{hidden, item}` is a secret stash;
//! 3. a `more` group splits the sentence into two notes, each classified on
//!    its own;
//! 4. a `body` group is a body or remains;
//! 5. a `door` group is a door annotation;
//! 6. `{feature, trigger, action}` is a curious feature;
//! 7. anything else keeps its groups as an annotated note.
//!
//! Text that no pattern matches is a plain note.

use std::sync::LazyLock;

use dv_core::document::NoteRecord;
use dv_core::text::{capitalize, decapitalize, items_sentence, sentence, strip_article, with_article};
use dv_core::{CuriousEffect, Direction, Note, NoteId, NoteKind, Point};
use regex::Regex;

use crate::items::parse_items;
use crate::patterns::{PatternMatch, first_match};
use crate::trigger::imperative_for;

const TELEPORT_WORDS: &[&str] = &[
    "teleport",
    "transported",
    "find yourself",
    "whisked away",
    "back at the entrance",
];

const GONE_WORDS: &[&str] = &[
    "crumbles",
    "vanishes",
    "disappears",
    "shatters",
    "collapses",
    "dissolves",
    "turns to dust",
    "falls apart",
    "burns away",
];

const TAKEN_WORDS: &[&str] = &["taken", "picked up", "removed", "lifted"];

/// Clause that hands items to the player ("..., revealing a silver key").
static GRANTING: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:revealing|reveals|producing|produces|dispensing|dispenses|spits out|leaving behind|leaves behind|yielding|yields)\s+(?P<item>.+)$",
    )
    .ok()
});

/// Classify a sentence into a note with the given id.
pub fn classify(id: NoteId, text: &str) -> Note {
    classify_at(id, text, Point::default(), "")
}

/// Classify a document note record.
pub fn classify_record(id: NoteId, record: &NoteRecord) -> Note {
    classify_at(id, &record.text, record.pos, &record.reference)
}

fn classify_at(id: NoteId, text: &str, pos: Point, reference: &str) -> Note {
    let text = text.trim();
    let kind = match first_match(text) {
        Some(m) => {
            tracing::trace!(note = %id, pattern = m.pattern, "note matched");
            kind_for(id, text, pos, reference, &m)
        }
        None => NoteKind::Plain,
    };
    Note {
        id,
        text: text.to_string(),
        pos,
        reference: reference.to_string(),
        kind,
    }
}

fn kind_for(id: NoteId, text: &str, pos: Point, reference: &str, m: &PatternMatch) -> NoteKind {
    if m.has_exactly(&["container", "item"]) {
        return container(m.get("container").unwrap_or_default(), m.get("item").unwrap_or_default());
    }
    if m.has_exactly(&["hidden", "item"]) {
        return secret(m.get("hidden").unwrap_or_default(), m.get("item").unwrap_or_default());
    }
    if let Some(at) = m.more_at {
        let (lead, rest) = text.split_at(at);
        return NoteKind::More {
            first: Box::new(classify_at(NoteId::CONTINUATION, lead, pos, reference)),
            second: Box::new(classify_at(id, rest, pos, reference)),
        };
    }
    if let Some(body) = m.get("body") {
        return remains(body, m.get("item"));
    }
    if let Some(door) = m.get("door") {
        return NoteKind::Door {
            door: door.to_lowercase(),
            direction: m.get("direction").and_then(Direction::parse),
            keyholes: m.get("keyholes").map(str::to_string),
        };
    }
    if let (Some(feature), Some(trigger), Some(action)) =
        (m.get("feature"), m.get("trigger"), m.get("action"))
    {
        return curious(feature, trigger, action);
    }

    NoteKind::Annotated {
        groups: m.groups.clone(),
        items: m.get("item").map(parse_items).unwrap_or_default(),
    }
}

fn container(noun: &str, item_list: &str) -> NoteKind {
    let container = noun.to_lowercase();
    let items = parse_items(item_list);
    NoteKind::Container {
        message: format!("You open the {container} and find {}.", items_sentence(&items)),
        imperative: format!("Open the {container}."),
        pristine: format!("There is {} here.", with_article(&container)),
        empty: format!("There is an empty {container} here."),
        container,
        items,
    }
}

fn secret(hidden: &str, item_list: &str) -> NoteKind {
    let items = parse_items(item_list);
    NoteKind::Secret {
        hidden: decapitalize(hidden),
        message: format!("You find {}.", items_sentence(&items)),
        items,
    }
}

fn remains(body: &str, item_list: Option<&str>) -> NoteKind {
    let items = item_list.map(parse_items).unwrap_or_default();
    let definite = format!("the {}", strip_article(body));
    let message = if items.is_empty() {
        format!("You search {definite} but find nothing.")
    } else {
        format!("You search {definite} and find {}.", items_sentence(&items))
    };
    NoteKind::Remains {
        body: decapitalize(body),
        items,
        message,
    }
}

fn curious(feature: &str, trigger: &str, action: &str) -> NoteKind {
    let lower_action = action.to_lowercase();
    let lower_trigger = trigger.to_lowercase();

    let effect = if TELEPORT_WORDS.iter().any(|w| lower_action.contains(w)) {
        CuriousEffect::Teleport
    } else if GONE_WORDS.iter().any(|w| lower_action.contains(w))
        || TAKEN_WORDS.iter().any(|w| lower_trigger.contains(w))
    {
        CuriousEffect::Gone
    } else {
        CuriousEffect::None
    };

    let items = GRANTING
        .as_ref()
        .and_then(|re| re.captures(action))
        .and_then(|caps| caps.name("item"))
        .map(|m| parse_items(m.as_str()))
        .unwrap_or_default();

    NoteKind::Curious {
        feature: decapitalize(feature),
        trigger: trigger.to_string(),
        imperative: imperative_for(trigger, feature),
        resolution: sentence(&capitalize(action)),
        items,
        effect,
    }
}
