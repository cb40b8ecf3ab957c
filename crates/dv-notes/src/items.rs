//! Item-list parsing.

/// Adjectives whose trailing comma joins two adjectives of one item.
const JOINING_ADJECTIVES: &[&str] = &["mysterious", "strange", "weird"];

/// Leading words lower-cased so items read naturally mid-sentence.
const LEADING_WORDS: &[&str] = &[
    "A", "An", "The", "Some", "One", "Two", "Three", "Four", "Five", "Six", "Several", "Many",
    "Few", "Assorted",
];

/// Split a noun-phrase list into ordered items.
///
/// Commas and "and" separate items, except a comma directly after
/// "mysterious", "strange", or "weird" ("a mysterious, glowing orb").
pub fn parse_items(list: &str) -> Vec<String> {
    let list = list.trim().trim_end_matches('.');
    let mut items = Vec::new();
    let mut current = String::new();

    for chunk in list.split(',') {
        if !current.is_empty() {
            let last_word = current
                .split_whitespace()
                .last()
                .unwrap_or_default()
                .to_lowercase();
            if JOINING_ADJECTIVES.contains(&last_word.as_str()) {
                current.push(',');
                current.push_str(chunk);
                continue;
            }
            items.push(std::mem::take(&mut current));
        }
        current.push_str(chunk);
    }
    if !current.is_empty() {
        items.push(current);
    }

    items
        .iter()
        .flat_map(|item| item.split(" and "))
        .map(|item| item.trim().trim_start_matches("and ").trim())
        .filter(|item| !item.is_empty())
        .map(decapitalize_item)
        .collect()
}

/// Lower-case a leading article or number word ("A dagger" -> "a dagger").
fn decapitalize_item(item: &str) -> String {
    let first = item.split_whitespace().next().unwrap_or_default();
    if LEADING_WORDS.contains(&first) {
        dv_core::text::decapitalize(item)
    } else {
        item.to_string()
    }
}
