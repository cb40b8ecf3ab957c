//! The action alphabet and player input parsing.

use std::fmt;

use dv_core::Direction;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

/// Minimum similarity for a "did you mean" suggestion (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.8;

/// Verb synonyms for action parsing.
const SEARCH_VERBS: &[&str] = &["search", "look", "l", "examine", "x"];
const USE_VERBS: &[&str] = &["use", "activate", "pull", "push", "touch"];
const QUIT_VERBS: &[&str] = &["quit", "q", "bye"];
const NOOP_VERBS: &[&str] = &["noop", "wait", "z"];
const INIT_VERBS: &[&str] = &["init", "start"];
const MOVE_VERBS: &[&str] = &["go", "move", "walk"];

/// A player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Start the session. Must come first.
    Init,
    /// Move through the first visible exit facing this way.
    Go(Direction),
    /// Move through the n-th visible exit in clockwise order (1-9).
    Exit(u8),
    /// Search the current room.
    Search,
    /// Fire the next curious feature.
    Use,
    /// Abandon the quest.
    Quit,
    /// Let a turn pass.
    Noop,
}

impl Action {
    /// Parse player input into an action.
    ///
    /// Accepts the canonical tokens plus a few synonyms; empty input is
    /// `noop`. Anything else is a syntax error carrying a suggestion when
    /// the input is close to a known verb.
    pub fn parse(input: &str) -> Result<Self, SoftError> {
        let input = input.trim();
        let words: Vec<String> = input.split_whitespace().map(str::to_lowercase).collect();
        let Some(verb) = words.first() else {
            return Ok(Self::Noop);
        };
        let rest = &words[1..];

        if let Some(action) = parse_target(verb) {
            if rest.is_empty() {
                return Ok(action);
            }
        }
        if MOVE_VERBS.contains(&verb.as_str()) {
            if let [target] = rest {
                if let Some(action) = parse_target(target) {
                    return Ok(action);
                }
            }
        }
        if rest.is_empty() || USE_VERBS.contains(&verb.as_str()) {
            if let Some(action) = parse_verb(verb) {
                return Ok(action);
            }
        }

        Err(SoftError::Syntax {
            input: input.to_string(),
            suggestion: suggest(verb),
        })
    }
}

/// A direction or an exit digit.
fn parse_target(word: &str) -> Option<Action> {
    if let Some(dir) = Direction::parse(word) {
        return Some(Action::Go(dir));
    }
    match word.parse::<u8>() {
        Ok(n @ 1..=9) if word.len() == 1 => Some(Action::Exit(n)),
        _ => None,
    }
}

fn parse_verb(verb: &str) -> Option<Action> {
    if SEARCH_VERBS.contains(&verb) {
        Some(Action::Search)
    } else if USE_VERBS.contains(&verb) {
        Some(Action::Use)
    } else if QUIT_VERBS.contains(&verb) {
        Some(Action::Quit)
    } else if NOOP_VERBS.contains(&verb) {
        Some(Action::Noop)
    } else if INIT_VERBS.contains(&verb) {
        Some(Action::Init)
    } else {
        None
    }
}

/// Closest canonical token to a mistyped verb.
fn suggest(verb: &str) -> Option<String> {
    const CANONICAL: &[&str] = &[
        "north", "south", "east", "west", "search", "use", "quit", "noop", "init",
    ];
    CANONICAL
        .iter()
        .map(|c| (*c, jaro_winkler(verb, c)))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c.to_string())
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::Go(dir) => f.write_str(dir.name()),
            Self::Exit(n) => write!(f, "{n}"),
            Self::Search => f.write_str("search"),
            Self::Use => f.write_str("use"),
            Self::Quit => f.write_str("quit"),
            Self::Noop => f.write_str("noop"),
        }
    }
}

/// A player mistake, reported as ordinary output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SoftError {
    /// Input outside the action alphabet.
    Syntax {
        /// What the player typed.
        input: String,
        /// Closest known action, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
}

impl SoftError {
    /// Tag reported in the output record's `error` field.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "syntax",
        }
    }
}

impl fmt::Display for SoftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax {
                input,
                suggestion: Some(s),
            } => write!(f, "I don't understand \"{input}\". Did you mean \"{s}\"?"),
            Self::Syntax { input, .. } => write!(f, "I don't understand \"{input}\"."),
        }
    }
}
