//! Locale-aware verb ordering
//!
//! Three comparison levels, in the manner of the Unicode Collation Algorithm:
//! 1. base letters, ignoring accents and case
//! 2. accents
//! 3. case, lowercase first
//!
//! Strings equal at all three levels compare `Equal`, so a stable sort keeps
//! their insertion order.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two verbs for display order
#[must_use]
pub fn locale_cmp(left: &str, right: &str) -> Ordering {
    primary_key(left)
        .cmp(&primary_key(right))
        .then_with(|| secondary_key(left).cmp(&secondary_key(right)))
        .then_with(|| tertiary_key(left).cmp(&tertiary_key(right)))
}

fn primary_key(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabetical_ignoring_case() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn lowercase_sorts_before_uppercase() {
        assert_eq!(locale_cmp("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_cmp("Apple", "Banana"), Ordering::Less);
    }

    #[test]
    fn accents_are_secondary() {
        assert_eq!(locale_cmp("eclair", "éclair"), Ordering::Less);
        assert_eq!(locale_cmp("éclair", "Ezra"), Ordering::Less);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(locale_cmp("Set", "Set up"), Ordering::Less);
        assert_eq!(locale_cmp("Set up", "Setup"), Ordering::Less);
    }

    #[test]
    fn identical_strings_are_equal() {
        assert_eq!(locale_cmp("Ask", "Ask"), Ordering::Equal);
    }
}
