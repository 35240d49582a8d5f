//! Character-level text cleanup applied before k-gram hashing.

/// ASCII whitespace removed by [`remove_whitespace`].
pub const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\u{0B}', '\u{0C}', '\r'];

/// Return `text` without any occurrence of the characters in `chars`.
pub fn remove_characters(text: &str, chars: &[char]) -> String {
    text.chars().filter(|c| !chars.contains(c)).collect()
}

/// Return `text` with all ASCII whitespace removed.
pub fn remove_whitespace(text: &str) -> String {
    remove_characters(text, &WHITESPACE)
}
