//! String utility functions for text processing

use std::cmp::Ordering;

/// Compare two strings the way a locale-aware collator orders display names
///
/// Strings are compared on their lowercase fold first, so `"hk 02"` and
/// `"HK 01"` sort next to each other. When the folds are equal the
/// lowercase variant sorts first.
///
/// # Arguments
///
/// * `a` - The first string
/// * `b` - The second string
///
/// # Returns
///
/// The ordering of `a` relative to `b`
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let fold_a = a.chars().flat_map(char::to_lowercase);
    let fold_b = b.chars().flat_map(char::to_lowercase);
    fold_a.cmp(fold_b).then_with(|| b.cmp(a))
}

/// Truncate a string to `max_chars` characters, appending `...` when cut
///
/// # Arguments
///
/// * `s` - The input string
/// * `max_chars` - Number of characters to keep
///
/// # Returns
///
/// The (possibly) shortened string
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
