//! Client for the remote correction service.
//!
//! Every call degrades to an inert value on failure: the caller gets its own
//! input back and the error is only logged.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::app::domain::settings::Settings;
use crate::app::domain::suggestions::{
    CorrectionResult, FeedbackRecord, RequestKind, SuggestionList, Suggestions, TextRequest, WordRequest,
};
use crate::app::infrastructure::error::{AppError, Result};

pub const FEEDBACK_ENDPOINT: &str = "/feedback";

/// POSTs a JSON body to a service path and returns the JSON answer.
pub trait SuggestionTransport: Send + Sync {
    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value>;
}

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct MinreqTransport {
    base_url: String,
    timeout_secs: u64,
}

impl MinreqTransport {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.base_url(), settings.timeout_secs)
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SuggestionTransport for MinreqTransport {
    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let response = minreq::post(self.url_for(path))
            .with_header("Accept", "application/json")
            .with_timeout(self.timeout_secs)
            .with_json(body)?
            .send()?;

        if !(200..300).contains(&response.status_code) {
            return Err(AppError::Http {
                status: response.status_code,
                path: path.to_string(),
            });
        }

        if response.as_bytes().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(response.as_bytes())?)
    }
}

/// The four service capabilities with their failure fallbacks.
#[derive(Clone)]
pub struct SuggestionService {
    transport: Arc<dyn SuggestionTransport>,
}

impl SuggestionService {
    pub fn new(transport: Arc<dyn SuggestionTransport>) -> Self {
        Self { transport }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(MinreqTransport::from_settings(settings)))
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let body = serde_json::to_value(body)?;
        let answer = self.transport.post_json(path, &body)?;
        Ok(serde_json::from_value(answer)?)
    }

    /// Correct a phrase. Falls back to `{corrected: text, suggestions: []}`.
    pub fn correct(&self, text: &str) -> CorrectionResult {
        let request = TextRequest { text: text.to_string() };
        match self.post::<_, CorrectionResult>(RequestKind::Correct.endpoint(), &request) {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "correct request failed; keeping text as is");
                CorrectionResult::unchanged(text)
            }
        }
    }

    /// Spell-fix candidates for one word.
    pub fn word_fix(&self, word: &str) -> Suggestions {
        self.word_lookup(RequestKind::WordFix, word)
    }

    /// Synonyms for one word.
    pub fn synonyms(&self, word: &str) -> Suggestions {
        self.word_lookup(RequestKind::Synonym, word)
    }

    fn word_lookup(&self, kind: RequestKind, word: &str) -> Suggestions {
        let request = WordRequest { word: word.to_string() };
        match self.post::<_, SuggestionList>(kind.endpoint(), &request) {
            Ok(list) => Suggestions::Offered(list.suggestions),
            Err(e) => {
                tracing::warn!(error = %e, endpoint = kind.endpoint(), "lookup failed; echoing word");
                Suggestions::Fallback(word.to_string())
            }
        }
    }

    /// Candidates for the popup, whatever the request kind.
    ///
    /// A failed correction shows up as an empty answer, since its fallback
    /// carries no suggestions.
    pub fn fetch(&self, kind: RequestKind, text: &str) -> Suggestions {
        match kind {
            RequestKind::Correct => Suggestions::Offered(self.correct(text).suggestions),
            RequestKind::WordFix => self.word_fix(text),
            RequestKind::Synonym => self.synonyms(text),
        }
    }

    /// Report the chosen suggestion. Errors are dropped.
    pub fn feedback(&self, record: &FeedbackRecord) {
        let body = match serde_json::to_value(record) {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(error = %e, "feedback not serializable");
                return;
            }
        };
        if let Err(e) = self.transport.post_json(FEEDBACK_ENDPOINT, &body) {
            tracing::debug!(error = %e, "feedback dropped");
        }
    }
}
