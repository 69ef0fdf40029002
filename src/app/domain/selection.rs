use serde::{Deserialize, Serialize};

use crate::app::services::text_ops::{
    char_len, leading_whitespace_len, trailing_whitespace_len,
};

/// A user's text selection, trimmed of incidental whitespace.
///
/// `start`/`end` are character offsets into the buffer the selection was
/// taken from, moved inward past the trimmed whitespace so that
/// `buffer[start..end] == text` for as long as the buffer is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDescriptor {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl SelectionDescriptor {
    /// Normalize a raw selection reported by a host.
    ///
    /// Returns `None` for empty and whitespace-only selections.
    pub fn from_raw(raw: &str, start: usize, end: usize) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        let leading = leading_whitespace_len(raw);
        let trailing = trailing_whitespace_len(raw);

        let start = start + leading;
        let end = end.saturating_sub(trailing).max(start);

        Some(Self {
            start,
            end,
            text: text.to_string(),
        })
    }

    /// Number of characters covered by the selection.
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
