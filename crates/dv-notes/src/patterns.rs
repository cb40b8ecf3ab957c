//! The ordered pattern table.
//!
//! Order is significant: the first pattern that matches a sentence wins and
//! later patterns are never consulted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

const CONTAINERS: &str = "chest|box|crate|barrel|coffer|sack|bag|urn|casket|cabinet|wardrobe|\
trunk|sarcophagus|coffin|strongbox|footlocker|jar|pot|basket|pouch|satchel";

const DIRECTIONS: &str = "north|south|east|west";

/// Pattern sources as `(name, regex)`, in priority order.
fn sources() -> Vec<(&'static str, String)> {
    vec![
        (
            "rear-entrance",
            r"^(?P<rear>The (?:rear|back) entrance[^.]*)\.\s+(?P<more>.+)$".to_string(),
        ),
        (
            "room-history",
            r"^(?P<lead>This (?:room|chamber|hall|place) (?:was|is|once was|used to be)[^.]*)\.\s+(?P<more>.+)$"
                .to_string(),
        ),
        (
            "container",
            format!(
                r"^(?:An?|The) (?P<container>(?:[\w'-]+ ){{0,3}}?(?:{CONTAINERS}))(?: in the corner| against the wall| on the floor)? (?:contains|containing|holds|holding|is filled with|filled with|with) (?P<item>[^.]+)\.?$"
            ),
        ),
        (
            "hidden-place-first",
            r"^(?:Hidden|Concealed|Tucked away) (?:under|behind|beneath|inside|in|among) (?P<hidden>[^,.]+?),? (?:is|are|lies|lie) (?P<item>[^.]+)\.?$"
                .to_string(),
        ),
        (
            "hidden-item-first",
            r"^(?P<item>[^.]+?) (?:is|are) hidden (?:under|behind|beneath|inside|in|among) (?P<hidden>[^.]+)\.?$"
                .to_string(),
        ),
        (
            "remains",
            r"^(?P<body>(?:An?|The) (?:dead|dying|slain|rotting|decapitated|mummified) [^,.]+?|(?:The )?(?:[Rr]emains|[Bb]ody|[Cc]orpse|[Ss]keleton|[Bb]ones) of [^,.]+?|(?:An?|The) (?:skeleton|corpse|body))(?:,? (?:still )?(?:clutching|holding|with|wearing|carrying) (?P<item>[^.]+))?\.?$"
                .to_string(),
        ),
        (
            "door-requirement",
            format!(
                r"^The (?P<door>(?:[\w-]+ )*?(?:door|doors|gate))(?: to the (?P<direction>{DIRECTIONS}))? (?:requires|needs|can only be opened with|can be opened with|opens with|has|is locked with|is sealed with) (?P<keyholes>[^.]+)\.?$"
            ),
        ),
        (
            "door-state",
            format!(
                r"^The (?P<door>(?:[\w-]+ )*?(?:door|doors|gate))(?: to the (?P<direction>{DIRECTIONS}))? (?:is|are) (?P<state>[^.]+)\.?$"
            ),
        ),
        (
            "curious",
            r"^(?P<feature>[^.]+)\.\s+(?:If|When|Once|Whenever) (?P<trigger>[^,]+), (?P<action>.+?)\.?$"
                .to_string(),
        ),
        (
            "on-surface",
            r"^(?:On|Upon) (?:the|an?) (?P<surface>[\w\s]+?) (?:lies|lie|rests|rest|sits|sit|is|are|stands|stand) (?P<item>[^.]+)\.?$"
                .to_string(),
        ),
        (
            "lying-here",
            r"^(?P<thing>[^.]+?) (?:lies|lie|rests|rest|sits|sit|hangs|hang|stands|stand) (?:here|on the floor|on the wall|in the corner|in the middle of the room)\.?$"
                .to_string(),
        ),
    ]
}

/// A compiled pattern.
#[derive(Debug)]
pub struct Pattern {
    /// Pattern name, for logs and tests.
    pub name: &'static str,
    regex: Regex,
}

/// All patterns, in priority order.
pub static PATTERNS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    sources()
        .into_iter()
        .filter_map(|(name, src)| match Regex::new(&src) {
            Ok(regex) => Some(Pattern { name, regex }),
            Err(e) => {
                tracing::error!(pattern = name, error = %e, "note pattern failed to compile");
                None
            }
        })
        .collect()
});

/// The outcome of running the pattern table over a sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch {
    /// Name of the winning pattern.
    pub pattern: &'static str,
    /// Every named group that captured non-empty text.
    pub groups: BTreeMap<String, String>,
    /// Byte offset where the `more` group starts, if it matched.
    pub more_at: Option<usize>,
}

impl PatternMatch {
    /// Whether the captured group names are exactly `names`.
    pub fn has_exactly(&self, names: &[&str]) -> bool {
        self.groups.len() == names.len() && names.iter().all(|n| self.groups.contains_key(*n))
    }

    /// Whether a group captured.
    pub fn has(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Captured text of a group.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.groups.get(name).map(String::as_str)
    }
}

/// Run the pattern table; the first match wins.
pub fn first_match(text: &str) -> Option<PatternMatch> {
    PATTERNS.iter().find_map(|p| {
        let caps = p.regex.captures(text)?;
        let mut groups = BTreeMap::new();
        let mut more_at = None;
        for name in p.regex.capture_names().flatten() {
            if let Some(m) = caps.name(name) {
                let value = m.as_str().trim();
                if value.is_empty() {
                    continue;
                }
                if name == "more" {
                    more_at = Some(m.start());
                }
                groups.insert(name.to_string(), value.to_string());
            }
        }
        Some(PatternMatch {
            pattern: p.name,
            groups,
            more_at,
        })
    })
}
