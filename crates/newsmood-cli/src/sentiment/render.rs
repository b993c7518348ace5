//! Report rendering for the terminal.

use std::io::{self, Write};

use chrono::Utc;
use clap::ValueEnum;
use newsmood_sentiment::{AnalysisReport, RunOutcome, SentimentLabel};
use serde::Serialize;

pub(crate) const NO_HEADLINES_MESSAGE: &str =
    "No recent headlines found. Please try a different query.";

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Metrics, distribution chart and headline table
    Text,
    /// The report as pretty-printed JSON
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    report: Option<&'a AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

/// Write the outcome of one run in the requested format.
pub(crate) fn render_outcome<W: Write>(
    out: &mut W,
    query: &str,
    outcome: &RunOutcome,
    format: OutputFormat,
) -> io::Result<()> {
    match (format, outcome) {
        (OutputFormat::Text, RunOutcome::Report(report)) => render_text(out, query, report),
        (OutputFormat::Text, RunOutcome::NoHeadlines) => writeln!(out, "{NO_HEADLINES_MESSAGE}"),
        (OutputFormat::Json, RunOutcome::Report(report)) => render_json(
            out,
            &JsonOutput {
                query,
                report: Some(report),
                message: None,
            },
        ),
        (OutputFormat::Json, RunOutcome::NoHeadlines) => render_json(
            out,
            &JsonOutput {
                query,
                report: None,
                message: Some(NO_HEADLINES_MESSAGE),
            },
        ),
    }
}

fn render_json<W: Write>(out: &mut W, payload: &JsonOutput<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, payload)?;
    writeln!(out)
}

fn render_text<W: Write>(out: &mut W, query: &str, report: &AnalysisReport) -> io::Result<()> {
    let now = Utc::now().format("%Y-%m-%d %H:%M UTC");

    writeln!(out, "# Sentiment Dashboard for '{query}'")?;
    writeln!(out)?;
    writeln!(out, "Generated: {now}")?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<18}{:<22}NEGATIVE SENTIMENT",
        "TOTAL HEADLINES", "POSITIVE SENTIMENT"
    )?;
    let positive = format!("{:.1}%", report.positive_pct);
    let negative = format!("{:.1}%", report.negative_pct);
    writeln!(out, "{:<18}{positive:<22}{negative}", report.total)?;
    writeln!(out)?;

    writeln!(out, "## Sentiment Distribution")?;
    writeln!(out)?;
    for label in [SentimentLabel::Positive, SentimentLabel::Negative] {
        let count = report.count_of(label);
        writeln!(
            out,
            "{:<10}{:<width$} {count} ({:.1}%)",
            label.as_str(),
            bar(count, report.total),
            share_pct(count, report.total),
            width = BAR_WIDTH
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Analyzed Headlines")?;
    writeln!(out)?;
    writeln!(out, "{:<11}{:<12}HEADLINE", "SENTIMENT", "CONFIDENCE")?;
    for row in &report.rows {
        let confidence = format!("{:.4}", row.confidence);
        writeln!(
            out,
            "{:<11}{confidence:<12}{}",
            row.label.as_str(),
            row.headline
        )?;
    }

    Ok(())
}

fn share_pct(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = count as f64 / total as f64;
    ratio * 100.0
}

fn bar(count: usize, total: usize) -> String {
    if total == 0 {
        return String::new();
    }
    "#".repeat(count * BAR_WIDTH / total)
}
