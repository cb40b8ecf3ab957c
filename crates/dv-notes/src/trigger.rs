//! Imperatives derived from trigger phrases.

use std::sync::LazyLock;

use dv_core::text::{capitalize, strip_article};
use regex::Regex;

/// Known triggers: `(words that must all appear, imperative)`.
const KNOWN_TRIGGERS: &[(&[&str], &str)] = &[
    (&["candle"], "Light the candles."),
    (&["sacrifice"], "Make a sacrifice."),
    (&["lever"], "Pull the lever."),
    (&["knob"], "Touch the knob."),
    (&["coin"], "Drop a coin."),
];

const IRREGULAR: &[(&str, &str)] = &[
    ("lit", "light"),
    ("made", "make"),
    ("rung", "ring"),
    ("struck", "strike"),
    ("broken", "break"),
    ("thrown", "throw"),
    ("spoken", "speak"),
    ("taken", "take"),
    ("eaten", "eat"),
    ("drunk", "drink"),
    ("worn", "wear"),
    ("said", "say"),
    ("read", "read"),
    ("put", "put"),
    ("shut", "shut"),
    ("hit", "hit"),
    ("sung", "sing"),
    ("blown", "blow"),
    ("drawn", "draw"),
    ("touched", "touch"),
];

static PASSIVE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?P<object>.+?) (?:is|are|gets|get|has been|have been) (?P<verb>[a-z]+)(?P<rest>.*)$")
        .ok()
});

/// Base form of a past participle ("tugged" -> "tug", "carried" -> "carry").
pub fn base_form(verb: &str) -> String {
    if let Some((_, base)) = IRREGULAR.iter().find(|(past, _)| *past == verb) {
        return (*base).to_string();
    }
    if let Some(stem) = verb.strip_suffix("ied") {
        return format!("{stem}y");
    }
    let Some(stem) = verb.strip_suffix("ed") else {
        return verb.to_string();
    };

    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 2 && chars[n - 1] == chars[n - 2] && !matches!(chars[n - 1], 'l' | 's' | 'f' | 'z') {
        // Doubled final consonant: "tugged" -> "tug".
        return chars[..n - 1].iter().collect();
    }
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u');
    let needs_e = match chars.as_slice() {
        [.., 'a', 't'] | [.., 'i', 'z'] | [.., 'v'] | [.., 'c'] | [.., 'u'] | [.., 'g'] => true,
        [.., v, 's'] if is_vowel(*v) => true,
        [.., c, 'l'] if !is_vowel(*c) && *c != 'l' && *c != 'r' => true,
        _ => false,
    };
    if needs_e {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

/// Imperative for firing a feature, from its trigger phrase.
///
/// Known triggers map through a small dictionary; anything phrased in the
/// passive ("the rope is tugged") becomes "Tug the rope."; otherwise the
/// player is told to examine the feature.
pub fn imperative_for(trigger: &str, feature: &str) -> String {
    let lower = trigger.to_lowercase();
    for (words, imperative) in KNOWN_TRIGGERS {
        if words.iter().all(|w| lower.contains(w)) {
            return (*imperative).to_string();
        }
    }

    if let Some(caps) = PASSIVE.as_ref().and_then(|re| re.captures(&lower)) {
        let object = &caps["object"];
        let verb = base_form(&caps["verb"]);
        let rest = caps["rest"].trim_end_matches(['.', ',']);
        return format!("{}{rest}.", capitalize(&format!("{verb} {object}")));
    }

    let noun = feature.split(" with ").next().unwrap_or(feature);
    format!("Examine the {}.", strip_article(noun).to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_triggers() {
        assert_eq!(imperative_for("the candles are lit", "An altar"), "Light the candles.");
        assert_eq!(imperative_for("a sacrifice is made", "A shrine"), "Make a sacrifice.");
        assert_eq!(imperative_for("the lever is pulled", "A lever"), "Pull the lever.");
        assert_eq!(imperative_for("the brass knob is touched", "A door"), "Touch the knob.");
        assert_eq!(imperative_for("a coin is dropped in", "A well"), "Drop a coin.");
    }

    #[test]
    fn passive_fallback() {
        assert_eq!(imperative_for("the rope is tugged", "A rope"), "Tug the rope.");
        assert_eq!(
            imperative_for("the statue is pushed aside", "A statue"),
            "Push the statue aside."
        );
        assert_eq!(imperative_for("the idol is taken", "An idol"), "Take the idol.");
    }

    #[test]
    fn examine_fallback() {
        assert_eq!(
            imperative_for("someone hums", "A crystal ball with swirling mist"),
            "Examine the crystal ball."
        );
    }

    #[test]
    fn base_forms() {
        assert_eq!(base_form("tugged"), "tug");
        assert_eq!(base_form("carried"), "carry");
        assert_eq!(base_form("pushed"), "push");
        assert_eq!(base_form("pulled"), "pull");
        assert_eq!(base_form("pressed"), "press");
        assert_eq!(base_form("moved"), "move");
        assert_eq!(base_form("activated"), "activate");
        assert_eq!(base_form("raised"), "raise");
        assert_eq!(base_form("opened"), "open");
        assert_eq!(base_form("turned"), "turn");
        assert_eq!(base_form("rung"), "ring");
    }
}
