//! Inference adapter for the hosted sentiment classification endpoint.
//!
//! Maps one text value to one sentiment label. The adapter never panics and
//! never produces a null label: empty input resolves to [`NEUTRAL_LABEL`]
//! without a network call, and any transport or decode failure resolves to
//! [`ERROR_LABEL`] at the row level so one bad call never aborts a batch.

use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};

/// Sentinel label for rows with empty or absent input text
pub const NEUTRAL_LABEL: &str = "NEUTRAL";

/// Sentinel label for rows whose inference call failed
pub const ERROR_LABEL: &str = "ERROR";

/// One element of the endpoint's JSON array response
#[derive(Debug, Deserialize)]
pub struct ClassificationResult {
    /// Model-assigned label, e.g. `POSITIVE`
    pub label: String,
    /// Model confidence score
    pub score: f64,
}

/// A classifier mapping one text value to one model label
///
/// Implementations may fail; the failure policy lives in [`sentiment_for`],
/// not in the classifier itself.
pub trait Classifier: Send + Sync {
    /// Classify a single non-empty text value
    fn classify(&self, text: &str) -> Result<String>;
}

/// Classifier backed by a hosted HTTP endpoint
///
/// Holds a [`ureq::Agent`] so the underlying connection pool is acquired once
/// and reused across rows instead of reconnecting per call.
pub struct EndpointClassifier {
    agent: ureq::Agent,
    endpoint: String,
}

impl EndpointClassifier {
    /// Create a classifier for a named endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            endpoint: endpoint.into(),
        }
    }
}

impl Classifier for EndpointClassifier {
    fn classify(&self, text: &str) -> Result<String> {
        let mut response = self
            .agent
            .post(self.endpoint.as_str())
            .send_json(json!({ "inputs": text }))
            .map_err(|e| Error::Inference(format!("endpoint call failed: {e}")))?;

        let results: Vec<ClassificationResult> = response
            .body_mut()
            .read_json()
            .map_err(|e| Error::Inference(format!("malformed endpoint response: {e}")))?;

        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| Error::Inference("endpoint returned no classifications".to_string()))?;
        Ok(first.label)
    }
}

/// Outcome of one row's sentiment resolution
///
/// Tagged so the caller can count and log failure reasons while the output
/// column still carries only the label string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentiment {
    /// The endpoint's label, taken verbatim
    Label(String),
    /// Input text was empty or absent; no call was made
    Neutral,
    /// The inference call failed; the reason is retained for logging only
    Failed(String),
}

impl Sentiment {
    /// The output label for this outcome
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Label(label) => label,
            Self::Neutral => NEUTRAL_LABEL,
            Self::Failed(_) => ERROR_LABEL,
        }
    }
}

/// Truncate text to its first `max_chars` characters
///
/// Hard cutoff with no word-boundary awareness; operates on character counts
/// so multi-byte text is never split inside a code point.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Resolve the sentiment for one row's text
///
/// Three-way branch, in priority order: empty or absent text resolves to
/// [`Sentiment::Neutral`] without invoking the classifier; a classifier
/// failure resolves to [`Sentiment::Failed`] and is logged at warn level;
/// otherwise the parsed label is returned verbatim, with no validation
/// against a known label set. Never panics, never propagates an error.
pub fn sentiment_for(
    classifier: &dyn Classifier,
    text: Option<&str>,
    max_chars: usize,
) -> Sentiment {
    let Some(text) = text.filter(|value| !value.is_empty()) else {
        return Sentiment::Neutral;
    };

    match classifier.classify(truncate_chars(text, max_chars)) {
        Ok(label) => Sentiment::Label(label),
        Err(reason) => {
            log::warn!("inference call failed, labelling row {ERROR_LABEL}: {reason}");
            Sentiment::Failed(reason.to_string())
        }
    }
}
