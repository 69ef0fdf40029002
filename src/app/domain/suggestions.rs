use serde::{Deserialize, Serialize};

use crate::app::domain::selection::SelectionDescriptor;
use crate::app::services::text_ops::is_single_word;

pub const NO_OPTIONS_MESSAGE: &str = "No available options";
pub const CHECK_SPELLING_MESSAGE: &str =
    "No available options. Make sure the selected word is written correctly (with diacritics).";

/// The remote capabilities the suggestion popup can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    /// Correct a whole phrase.
    Correct,
    /// Spell-fix a single word.
    WordFix,
    /// Synonyms for a single word.
    Synonym,
}

impl RequestKind {
    /// Service endpoint path for this request.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Correct => "/correct",
            Self::WordFix => "/word",
            Self::Synonym => "/synonym",
        }
    }

    /// Label shown on the popup button.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Correct => "Correct",
            Self::WordFix => "Levenshtein",
            Self::Synonym => "Synonym",
        }
    }

    /// Message shown when the service answers with no candidates.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Self::Synonym => CHECK_SPELLING_MESSAGE,
            Self::Correct | Self::WordFix => NO_OPTIONS_MESSAGE,
        }
    }

    /// Whether picking one of this kind's suggestions is reported back as feedback.
    pub fn records_feedback(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Which popup actions a selection allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMenu {
    single_word: bool,
}

impl ActionMenu {
    pub fn for_selection(selection: &SelectionDescriptor) -> Self {
        Self {
            single_word: is_single_word(&selection.text),
        }
    }

    /// Word lookups need a single word; phrase correction always applies.
    pub fn is_enabled(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::WordFix | RequestKind::Synonym => self.single_word,
            RequestKind::Correct => true,
        }
    }

    /// Action fired automatically when the popup opens.
    pub fn default_action(&self) -> RequestKind {
        if self.single_word {
            RequestKind::WordFix
        } else {
            RequestKind::Correct
        }
    }
}

/// Ordered candidates for a selection, or the inert fallback after a
/// transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// What the service answered. May be empty.
    Offered(Vec<String>),
    /// The request failed; carries the original input unchanged.
    Fallback(String),
}

impl Suggestions {
    /// Candidates to present, in order. A fallback offers the input itself.
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Self::Offered(list) => list.clone(),
            Self::Fallback(original) => vec![original.clone()],
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// True only for a successful answer with nothing in it.
    pub fn is_empty_answer(&self) -> bool {
        matches!(self, Self::Offered(list) if list.is_empty())
    }
}

/// Result of a `/correct` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub corrected: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl CorrectionResult {
    /// The inert value used when the service cannot be reached.
    pub fn unchanged(text: &str) -> Self {
        Self {
            corrected: text.to_string(),
            suggestions: Vec::new(),
        }
    }
}

/// Response body shared by `/word` and `/synonym`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionList {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRequest {
    pub word: String,
}

/// Which suggestion the user chose, sent to `/feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub original: String,
    pub suggestions: Vec<String>,
    pub chosen: String,
}
