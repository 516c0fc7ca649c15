//! Case-insensitive character helpers. Lengths and indices are in chars, not bytes.

/// Whether two characters are equal ignoring case.
pub fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Number of characters in `word`.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// The character at position `index`, if any.
pub fn char_at(word: &str, index: usize) -> Option<char> {
    word.chars().nth(index)
}

/// Whether `prefix` is a case-insensitive prefix of `word`.
pub fn is_prefix_ignore_case(prefix: &str, word: &str) -> bool {
    let mut word_chars = word.chars();
    prefix
        .chars()
        .all(|p| word_chars.next().is_some_and(|w| chars_match(p, w)))
}

/// Whether two strings are equal ignoring case.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    char_len(a) == char_len(b) && is_prefix_ignore_case(a, b)
}
