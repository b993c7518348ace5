use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ClassifierError;

/// Binary sentiment label. There is no neutral class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = ClassifierError;

    /// Parses the raw label emitted by a classifier, ignoring case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("positive") {
            Ok(SentimentLabel::Positive)
        } else if trimmed.eq_ignore_ascii_case("negative") {
            Ok(SentimentLabel::Negative)
        } else {
            Err(ClassifierError::UnknownLabel(s.to_string()))
        }
    }
}

/// Classifier output for one headline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Certainty for `label`, in [0.0, 1.0].
    pub confidence: f32,
}

/// One row of the analysis dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedHeadline {
    pub headline: String,
    #[serde(rename = "sentiment")]
    pub label: SentimentLabel,
    pub confidence: f32,
}

/// Result of one pipeline run: the analysed rows plus summary statistics.
///
/// Build it with [`AnalysisReport::from_rows`] so the counts and
/// percentages always agree with `rows`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    /// `100 * positive_count / total`, or `0.0` when there are no rows.
    pub positive_pct: f64,
    /// Complement of `positive_pct`. Only valid because the label space is
    /// strictly binary; a neutral class would break this relationship.
    pub negative_pct: f64,
    pub rows: Vec<AnalyzedHeadline>,
}

impl AnalysisReport {
    #[must_use]
    pub fn from_rows(rows: Vec<AnalyzedHeadline>) -> Self {
        let total = rows.len();
        let positive_count = rows
            .iter()
            .filter(|r| r.label == SentimentLabel::Positive)
            .count();
        let negative_count = rows
            .iter()
            .filter(|r| r.label == SentimentLabel::Negative)
            .count();

        let positive_pct = if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let ratio = positive_count as f64 / total as f64;
            ratio * 100.0
        };

        Self {
            total,
            positive_count,
            negative_count,
            positive_pct,
            negative_pct: 100.0 - positive_pct,
            rows,
        }
    }

    /// Report for a run with no headlines.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_rows(Vec::new())
    }

    /// Number of rows carrying `label`.
    #[must_use]
    pub fn count_of(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive_count,
            SentimentLabel::Negative => self.negative_count,
        }
    }
}
