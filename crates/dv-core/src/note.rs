use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Direction, Point};

/// Identifier of a note: its index in the input document's `notes[]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub usize);

impl NoteId {
    /// Id carried by the leading half of a split continuation note.
    ///
    /// Never the target of a status update.
    pub const CONTINUATION: NoteId = NoteId(usize::MAX);
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::CONTINUATION {
            f.write_str("-")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Side effect of firing a curious feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuriousEffect {
    /// The feature stays as it is.
    #[default]
    None,
    /// The feature is destroyed or carried off.
    Gone,
    /// The player is carried back to the starting room.
    Teleport,
}

/// Typed payload of a note, decided once by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoteKind {
    /// No pattern matched.
    Plain,
    /// A pattern matched, but its groups form no known shape.
    Annotated {
        /// Every named group that matched.
        groups: BTreeMap<String, String>,
        /// Items parsed from an `item` group, if one matched.
        items: Vec<String>,
    },
    /// A closed container holding items.
    Container {
        /// Container noun ("iron chest").
        container: String,
        /// Items inside, in order.
        items: Vec<String>,
        /// Message shown when opened.
        message: String,
        /// Imperative offered to the player.
        imperative: String,
        /// Room prose while unopened.
        pristine: String,
        /// Room prose once emptied.
        empty: String,
    },
    /// Items hidden somewhere in the room.
    Secret {
        /// Hiding place.
        hidden: String,
        /// Hidden items, in order.
        items: Vec<String>,
        /// Message shown on discovery.
        message: String,
    },
    /// A body, corpse, remains, or a dying creature, possibly carrying items.
    Remains {
        /// Who or what lies here.
        body: String,
        /// Carried items, in order.
        items: Vec<String>,
        /// Message shown when searched.
        message: String,
    },
    /// An annotation about a door, optionally naming keys it needs.
    Door {
        /// Door noun ("double door").
        door: String,
        /// Side of the room the door is on.
        direction: Option<Direction>,
        /// Key requirement ("a small brass key", "three keyholes").
        keyholes: Option<String>,
    },
    /// A feature that reacts when triggered.
    Curious {
        /// The feature itself.
        feature: String,
        /// Trigger phrase as written ("the candles are lit").
        trigger: String,
        /// Imperative derived from the trigger ("Light the candles.").
        imperative: String,
        /// What happens when fired.
        resolution: String,
        /// Items granted when fired.
        items: Vec<String>,
        /// Lasting side effect.
        effect: CuriousEffect,
    },
    /// A note split into two independent notes.
    More {
        /// Leading note; carries [`NoteId::CONTINUATION`].
        first: Box<Note>,
        /// Trailing note; carries the parent's id.
        second: Box<Note>,
    },
}

impl NoteKind {
    /// Short tag for listings.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Annotated { .. } => "annotated",
            Self::Container { .. } => "container",
            Self::Secret { .. } => "secret",
            Self::Remains { .. } => "remains",
            Self::Door { .. } => "door",
            Self::Curious { .. } => "curious",
            Self::More { .. } => "more",
        }
    }
}

/// A free-text annotation anchored inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Document index, or [`NoteId::CONTINUATION`].
    pub id: NoteId,
    /// Source sentence.
    pub text: String,
    /// Anchor position.
    pub pos: Point,
    /// Label shown on the map ("1", "A").
    pub reference: String,
    /// Classified payload.
    #[serde(flatten)]
    pub kind: NoteKind,
}

impl Note {
    /// Items this note hands out when searched or fired.
    pub fn items(&self) -> &[String] {
        match &self.kind {
            NoteKind::Annotated { items, .. }
            | NoteKind::Container { items, .. }
            | NoteKind::Secret { items, .. }
            | NoteKind::Remains { items, .. }
            | NoteKind::Curious { items, .. } => items,
            NoteKind::Plain | NoteKind::Door { .. } | NoteKind::More { .. } => &[],
        }
    }

    /// Whether this is the leading half of a split note.
    pub fn is_continuation(&self) -> bool {
        self.id == NoteId::CONTINUATION
    }

    /// Imperative of a curious feature.
    pub fn imperative(&self) -> Option<&str> {
        match &self.kind {
            NoteKind::Curious { imperative, .. } => Some(imperative),
            _ => None,
        }
    }

    /// Expand continuation notes into their independent parts.
    pub fn flatten(self) -> Vec<Note> {
        match self.kind {
            NoteKind::More { first, second } => {
                let mut notes = first.flatten();
                notes.extend(second.flatten());
                notes
            }
            _ => vec![self],
        }
    }
}
