//! Sentiment command handlers for the CLI.

mod render;

use std::io::Write;

use anyhow::Context;
use clap::Subcommand;
use newsmood_core::{AppConfig, ClassifierKind};
use newsmood_sentiment::{
    run_analysis, shared_classifier, FetchError, NewsApiClient, SentimentClassifier,
    SentimentError,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::session::RunState;

pub use render::OutputFormat;

/// Query used when none is given on the command line.
pub(crate) const DEFAULT_QUERY: &str = "Tesla";

/// Commands available on the `newsmood` binary.
#[derive(Debug, Subcommand)]
pub enum SentimentCommands {
    /// Fetch recent headlines for a company or ticker and score their sentiment
    Analyze {
        /// Company name (e.g. "Apple") or ticker (e.g. "TSLA")
        #[arg(default_value = DEFAULT_QUERY)]
        query: String,

        /// Only consider headlines from the last N days (defaults to config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        lookback_days: Option<u32>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Classifier to use: lexicon or distilbert (defaults to config)
        #[arg(long, value_parser = parse_classifier)]
        classifier: Option<ClassifierKind>,
    },
    /// Read one query per line from stdin and analyze each in turn
    Interactive {
        /// Only consider headlines from the last N days (defaults to config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        lookback_days: Option<u32>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Classifier to use: lexicon or distilbert (defaults to config)
        #[arg(long, value_parser = parse_classifier)]
        classifier: Option<ClassifierKind>,
    },
}

fn parse_classifier(s: &str) -> Result<ClassifierKind, String> {
    newsmood_core::parse_classifier_kind(s).map_err(|e| e.to_string())
}

/// Run one analysis for `query` and print the result to stdout.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the fetch or
/// classification fails, or stdout cannot be written.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    query: &str,
    lookback_days: Option<u32>,
    format: OutputFormat,
    classifier: Option<ClassifierKind>,
) -> anyhow::Result<()> {
    let client = NewsApiClient::from_config(config)?;
    let classifier = select_classifier(config, classifier).await?;
    let lookback_days = lookback_days.unwrap_or(config.lookback_days);
    let mut state = RunState::default();

    run_triggered(&mut state, &client, classifier, query, lookback_days, format).await
}

/// Interactive session: every line on stdin triggers one run.
///
/// A failed run is reported and the session re-arms for the next query.
/// `quit`, `exit` or end of input ends the session.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or stdin cannot be read.
pub(crate) async fn run_interactive(
    config: &AppConfig,
    lookback_days: Option<u32>,
    format: OutputFormat,
    classifier: Option<ClassifierKind>,
) -> anyhow::Result<()> {
    let client = NewsApiClient::from_config(config)?;
    let classifier = select_classifier(config, classifier).await?;
    let lookback_days = lookback_days.unwrap_or(config.lookback_days);
    let mut state = RunState::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let query = line.trim();
        match query {
            "" => {}
            "quit" | "exit" => break,
            _ => {
                if let Err(e) =
                    run_triggered(&mut state, &client, classifier, query, lookback_days, format)
                        .await
                {
                    eprintln!("{e:#}");
                }
            }
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    write!(stderr, "company or ticker> ")?;
    stderr.flush()
}

/// Drive one run through the `RunState` lifecycle.
async fn run_triggered(
    state: &mut RunState,
    client: &NewsApiClient,
    classifier: &dyn SentimentClassifier,
    query: &str,
    lookback_days: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    state.trigger(query)?;
    let query = state.start()?;

    let result = run_analysis(client, classifier, &query, lookback_days).await;

    state.finish()?;
    state.reset();

    let outcome = result.map_err(|e| describe_failure(&query, e))?;
    let mut stdout = std::io::stdout().lock();
    render::render_outcome(&mut stdout, &query, &outcome, format)?;
    Ok(())
}

/// Resolve the classifier for this session; the command-line choice wins
/// over `NEWSMOOD_CLASSIFIER`.
async fn select_classifier(
    config: &AppConfig,
    choice: Option<ClassifierKind>,
) -> anyhow::Result<&'static dyn SentimentClassifier> {
    let kind = choice.unwrap_or(config.classifier);
    tracing::debug!(classifier = %kind, "selecting sentiment classifier");
    match kind {
        ClassifierKind::Lexicon => Ok(shared_classifier()),
        ClassifierKind::DistilBert => distilbert_classifier(&config.model_dir).await,
    }
}

#[cfg(feature = "distilbert")]
async fn distilbert_classifier(model_dir: &str) -> anyhow::Result<&'static dyn SentimentClassifier> {
    let classifier =
        newsmood_sentiment::shared_distilbert_classifier(std::path::Path::new(model_dir))
            .await
            .context("DistilBERT classifier unavailable")?;
    Ok(classifier)
}

#[cfg(not(feature = "distilbert"))]
#[allow(clippy::unused_async)]
async fn distilbert_classifier(_model_dir: &str) -> anyhow::Result<&'static dyn SentimentClassifier> {
    anyhow::bail!(
        "this build does not include the distilbert classifier; \
         rebuild with `--features distilbert` or use `--classifier lexicon`"
    )
}

/// Turn a pipeline error into the message shown to the user.
fn describe_failure(query: &str, err: SentimentError) -> anyhow::Error {
    match err {
        SentimentError::Fetch(FetchError::Api { message, .. }) => {
            anyhow::anyhow!("API Error: {message}")
        }
        other => anyhow::Error::new(other).context(format!("analysis failed for '{query}'")),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::Cli;

    use super::*;

    #[test]
    fn parses_analyze_defaults() {
        let cli = Cli::try_parse_from(["newsmood", "analyze"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(SentimentCommands::Analyze {
                ref query,
                lookback_days: None,
                format: OutputFormat::Text,
                classifier: None,
            }) if query == "Tesla"
        ));
    }

    #[test]
    fn parses_analyze_with_query_and_options() {
        let cli = Cli::try_parse_from([
            "newsmood",
            "analyze",
            "AAPL",
            "--lookback-days",
            "3",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(SentimentCommands::Analyze {
                ref query,
                lookback_days: Some(3),
                format: OutputFormat::Json,
                classifier: None,
            }) if query == "AAPL"
        ));
    }

    #[test]
    fn rejects_zero_lookback_days() {
        let result = Cli::try_parse_from(["newsmood", "analyze", "--lookback-days", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_classifier_choice() {
        let cli = Cli::try_parse_from(["newsmood", "analyze", "--classifier", "distilbert"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(SentimentCommands::Analyze {
                classifier: Some(ClassifierKind::DistilBert),
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_classifier() {
        let result = Cli::try_parse_from(["newsmood", "interactive", "--classifier", "vader"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn lexicon_is_selected_without_model_files() {
        let config = test_config(ClassifierKind::Lexicon);
        let classifier = select_classifier(&config, None).await.unwrap();
        let results = classifier
            .classify(&["Shares plunge after earnings miss"])
            .unwrap();
        assert_eq!(results[0].label, newsmood_sentiment::SentimentLabel::Negative);
    }

    #[cfg(not(feature = "distilbert"))]
    #[tokio::test]
    async fn distilbert_without_feature_explains_how_to_enable_it() {
        let config = test_config(ClassifierKind::Lexicon);
        let err = select_classifier(&config, Some(ClassifierKind::DistilBert))
            .await
            .err()
            .expect("distilbert is not compiled in");
        assert!(err.to_string().contains("--features distilbert"), "{err}");
    }

    fn test_config(classifier: ClassifierKind) -> AppConfig {
        AppConfig {
            env: newsmood_core::Environment::Test,
            log_level: "info".to_string(),
            news_api_key: "test-key".to_string(),
            news_api_base_url: newsmood_core::DEFAULT_NEWS_API_BASE_URL.to_string(),
            lookback_days: 7,
            request_timeout_secs: 30,
            user_agent: newsmood_core::DEFAULT_USER_AGENT.to_string(),
            classifier,
            model_dir: "models/unused".to_string(),
        }
    }

    #[test]
    fn parses_interactive() {
        let cli = Cli::try_parse_from(["newsmood", "interactive"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(SentimentCommands::Interactive {
                lookback_days: None,
                format: OutputFormat::Text,
                classifier: None,
            })
        ));
    }

    #[test]
    fn api_failures_show_upstream_message() {
        let err = describe_failure(
            "Tesla",
            SentimentError::Fetch(FetchError::Api {
                status: 429,
                message: "You have made too many requests recently.".to_string(),
            }),
        );
        assert_eq!(
            err.to_string(),
            "API Error: You have made too many requests recently."
        );
    }

    #[test]
    fn other_failures_keep_query_context() {
        let err = describe_failure("Tesla", SentimentError::EmptyQuery);
        assert_eq!(err.to_string(), "analysis failed for 'Tesla'");
        assert_eq!(format!("{err:#}"), "analysis failed for 'Tesla': query must not be empty");
    }
}
