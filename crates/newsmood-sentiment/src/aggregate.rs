//! Joins headlines with their classifications and summarises them.

use std::collections::HashSet;

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::types::{AnalysisReport, AnalyzedHeadline};

/// Classify a set of headlines and build the report.
///
/// Headlines are sorted into a stable order, the classifier is called once
/// with the whole batch, and its results are zipped back by index. An empty
/// set yields [`AnalysisReport::empty`] without touching the classifier.
///
/// # Errors
///
/// - [`SentimentError::Classifier`] if the classifier fails; no partial
///   report is produced.
/// - [`SentimentError::LengthMismatch`] or
///   [`SentimentError::InvalidConfidence`] if the classifier breaks its
///   contract.
pub fn analyze<C>(
    headlines: &HashSet<String>,
    classifier: &C,
) -> Result<AnalysisReport, SentimentError>
where
    C: SentimentClassifier + ?Sized,
{
    if headlines.is_empty() {
        return Ok(AnalysisReport::empty());
    }

    let mut ordered: Vec<&str> = headlines.iter().map(String::as_str).collect();
    ordered.sort_unstable();

    let results = classifier.classify(&ordered)?;
    if results.len() != ordered.len() {
        return Err(SentimentError::LengthMismatch {
            expected: ordered.len(),
            got: results.len(),
        });
    }

    let rows = ordered
        .into_iter()
        .zip(results)
        .enumerate()
        .map(|(index, (headline, result))| {
            if !(0.0..=1.0).contains(&result.confidence) {
                return Err(SentimentError::InvalidConfidence {
                    index,
                    confidence: result.confidence,
                });
            }
            Ok(AnalyzedHeadline {
                headline: headline.to_string(),
                label: result.label,
                confidence: result.confidence,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisReport::from_rows(rows))
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
