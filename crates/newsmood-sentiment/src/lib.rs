//! Headline sentiment pipeline.
//!
//! Fetches recent news headlines for a company or ticker, classifies each
//! one as POSITIVE or NEGATIVE with a confidence score, and summarises the
//! batch as an [`AnalysisReport`].

pub mod aggregate;
pub mod classifier;
#[cfg(feature = "distilbert")]
pub mod distilbert;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod scorer;
pub mod sources;
pub mod types;

pub use aggregate::analyze;
pub use classifier::{shared_classifier, LexiconClassifier, SentimentClassifier};
#[cfg(feature = "distilbert")]
pub use distilbert::{shared_distilbert_classifier, DistilBertBackend};
pub use error::{ClassifierError, FetchError, SentimentError};
pub use model::{ModelClassifier, RawPrediction, TextClassificationBackend};
pub use pipeline::{run_analysis, RunOutcome};
pub use scorer::lexicon_score;
pub use sources::{HeadlineSource, NewsApiClient};
pub use types::{AnalysisReport, AnalyzedHeadline, SentimentLabel, SentimentResult};
