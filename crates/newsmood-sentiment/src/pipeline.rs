//! Sentiment pipeline orchestration.

use crate::aggregate::analyze;
use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::sources::HeadlineSource;
use crate::types::AnalysisReport;

/// What one pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Report(AnalysisReport),
    /// The source found nothing for the query. Not an error.
    NoHeadlines,
}

/// Run the full pipeline for one query.
///
/// 1. Validate the query.
/// 2. Fetch distinct headlines from `source` over the lookback window.
/// 3. Classify the whole batch once and aggregate it into a report.
///
/// The pipeline keeps no state between calls.
///
/// # Errors
///
/// Returns [`SentimentError::EmptyQuery`] for a blank query,
/// [`SentimentError::Fetch`] if the source fails (the classifier is never
/// invoked), or any error from [`analyze`]. Nothing is retried.
pub async fn run_analysis<S, C>(
    source: &S,
    classifier: &C,
    query: &str,
    lookback_days: u32,
) -> Result<RunOutcome, SentimentError>
where
    S: HeadlineSource,
    C: SentimentClassifier + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return Err(SentimentError::EmptyQuery);
    }

    tracing::info!(query, lookback_days, "fetching headlines");
    let headlines = source.fetch(query, lookback_days).await?;

    if headlines.is_empty() {
        tracing::warn!(query, "no recent headlines found");
        return Ok(RunOutcome::NoHeadlines);
    }

    let report = analyze(&headlines, classifier)?;
    tracing::info!(
        query,
        total = report.total,
        positive = report.positive_count,
        negative = report.negative_count,
        "sentiment analysis complete"
    );

    Ok(RunOutcome::Report(report))
}
