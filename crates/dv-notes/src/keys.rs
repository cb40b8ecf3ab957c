//! Key requirements on doors.

fn number_word(word: &str) -> Option<usize> {
    match word.to_lowercase().as_str() {
        "a" | "an" | "one" | "single" => Some(1),
        "two" | "2" => Some(2),
        "three" | "3" => Some(3),
        "four" | "4" => Some(4),
        _ => None,
    }
}

/// Number of keys a keyhole phrase demands.
///
/// The leading word decides: "a"/"an"/"one" need one key, "two", "three"
/// and "four" their count. Anything else needs one.
pub fn keys_required(keyholes: &str) -> usize {
    keyholes
        .split_whitespace()
        .next()
        .and_then(number_word)
        .unwrap_or(1)
}

/// Number of keys an inventory item counts for.
///
/// "a small brass key" is one key, "two iron keys" is two, anything not
/// ending in "key"/"keys" is none.
pub fn key_count(item: &str) -> usize {
    let item = item.trim().trim_end_matches(['.', '!']);
    let last = item.split_whitespace().last().unwrap_or_default().to_lowercase();
    if last == "key" {
        1
    } else if last == "keys" {
        item.split_whitespace()
            .next()
            .and_then(number_word)
            .unwrap_or(1)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_counts() {
        assert_eq!(keys_required("a small brass key"), 1);
        assert_eq!(keys_required("two keys"), 2);
        assert_eq!(keys_required("Three keyholes"), 3);
        assert_eq!(keys_required("four keyholes"), 4);
        assert_eq!(keys_required("the key of the abbot"), 1);
    }

    #[test]
    fn inventory_counts() {
        assert_eq!(key_count("a small brass key"), 1);
        assert_eq!(key_count("two iron keys"), 2);
        assert_eq!(key_count("a keyring"), 0);
        assert_eq!(key_count("a dagger"), 0);
    }
}
