//! Sentiment classification capability.
//!
//! The pipeline only depends on [`SentimentClassifier`]; the bundled
//! [`LexiconClassifier`] is the in-process default, shared for the whole
//! process through [`shared_classifier`].

use std::sync::OnceLock;

use crate::error::ClassifierError;
use crate::scorer::{lexicon_score, LEXICON};
use crate::types::{SentimentLabel, SentimentResult};

/// Batch sentiment classifier.
///
/// Implementations must be order- and length-preserving: `output[i]`
/// describes `headlines[i]`. Callers invoke it once per run with the whole
/// batch and make no assumption about latency.
pub trait SentimentClassifier {
    /// Classify every headline in `headlines`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the batch cannot be classified. No
    /// partial output is returned.
    fn classify(&self, headlines: &[&str]) -> Result<Vec<SentimentResult>, ClassifierError>;
}

/// Deterministic word-lexicon classifier.
///
/// A headline's raw score comes from [`lexicon_score`]. Negative scores are
/// labelled NEGATIVE, everything else POSITIVE, and confidence maps `|score|`
/// onto `[0.5, 1.0]` like the winning side of a binary softmax.
#[derive(Debug, Default)]
pub struct LexiconClassifier {
    _private: (),
}

impl LexiconClassifier {
    #[must_use]
    pub fn new() -> Self {
        tracing::debug!(entries = LEXICON.len(), "sentiment lexicon loaded");
        Self { _private: () }
    }

    fn classify_one(headline: &str) -> SentimentResult {
        let score = lexicon_score(headline);
        let label = if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Positive
        };
        SentimentResult {
            label,
            confidence: 0.5 + score.abs() / 2.0,
        }
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, headlines: &[&str]) -> Result<Vec<SentimentResult>, ClassifierError> {
        Ok(headlines.iter().map(|h| Self::classify_one(h)).collect())
    }
}

/// Process-wide classifier, built on first use and never torn down.
///
/// The instance is immutable after construction, so concurrent readers need
/// no locking.
#[must_use]
pub fn shared_classifier() -> &'static LexiconClassifier {
    static CLASSIFIER: OnceLock<LexiconClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(LexiconClassifier::new)
}
