//! Character-offset text helpers shared by selection capture and write-back.
//!
//! Every offset in this crate counts Unicode scalar values (`char`s), never
//! bytes, so offsets reported by a host can be applied to any buffer without
//! landing inside a multi-byte sequence.

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the `char_offset`-th character, clamped to the end of `text`.
fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Slice `text` by character offsets.
///
/// Offsets past the end are clamped. An inverted range yields an empty string.
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let from = byte_index(text, start);
    let to = byte_index(text, end);
    if to <= from {
        return "";
    }
    &text[from..to]
}

/// Build `original[..start] + replacement + original[end..]`, by characters.
///
/// Offsets past the end of `original` are clamped to its length.
pub fn splice_chars(original: &str, replacement: &str, start: usize, end: usize) -> String {
    let head = &original[..byte_index(original, start)];
    let tail = &original[byte_index(original, end)..];

    let mut result = String::with_capacity(head.len() + replacement.len() + tail.len());
    result.push_str(head);
    result.push_str(replacement);
    result.push_str(tail);
    result
}

/// Length in characters of the whitespace run at the start of `text`.
pub fn leading_whitespace_len(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}

/// Length in characters of the whitespace run at the end of `text`.
pub fn trailing_whitespace_len(text: &str) -> usize {
    text.chars().rev().take_while(|c| c.is_whitespace()).count()
}

/// True when `text` contains anything besides whitespace.
pub fn has_visible_text(text: &str) -> bool {
    text.chars().any(|c| !c.is_whitespace())
}

/// True when `text` is one word made only of letters (any script).
///
/// Spell-fix and synonym lookups only make sense for such selections.
pub fn is_single_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}
