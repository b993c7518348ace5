//! Adapter from a text-classification model to [`SentimentClassifier`].
//!
//! Model backends speak in raw label strings and scores (`"POSITIVE"`,
//! `0.998`). [`ModelClassifier`] turns those into typed
//! [`SentimentResult`]s, so a label the pipeline cannot represent fails the
//! run instead of being coerced into one of the two classes.

use crate::classifier::SentimentClassifier;
use crate::error::ClassifierError;
use crate::types::{SentimentLabel, SentimentResult};

/// Untyped prediction as a model reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    pub label: String,
    /// Probability of `label`, in [0.0, 1.0].
    pub score: f32,
}

/// A model that scores a batch of texts.
///
/// The outer `Result` fails the whole batch (model not usable); the inner
/// one reports a failure on a single text, e.g. tokenization.
pub trait TextClassificationBackend {
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the batch cannot be run at all.
    #[allow(clippy::type_complexity)]
    fn predict_batch(
        &self,
        texts: &[&str],
    ) -> Result<Vec<Result<RawPrediction, ClassifierError>>, ClassifierError>;
}

/// [`SentimentClassifier`] backed by a [`TextClassificationBackend`].
#[derive(Debug)]
pub struct ModelClassifier<B> {
    backend: B,
}

impl<B: TextClassificationBackend> ModelClassifier<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TextClassificationBackend> SentimentClassifier for ModelClassifier<B> {
    fn classify(&self, headlines: &[&str]) -> Result<Vec<SentimentResult>, ClassifierError> {
        let predictions = self.backend.predict_batch(headlines)?;
        predictions
            .into_iter()
            .enumerate()
            .map(|(index, prediction)| -> Result<SentimentResult, ClassifierError> {
                let raw = prediction.map_err(|e| match e {
                    ClassifierError::Inference(reason) => {
                        ClassifierError::Inference(format!("headline #{index}: {reason}"))
                    }
                    other => other,
                })?;
                let label: SentimentLabel = raw.label.parse()?;
                Ok(SentimentResult {
                    label,
                    confidence: raw.score,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that answers from a fixed table, in input order.
    struct TableBackend {
        rows: Vec<(&'static str, Result<(&'static str, f32), &'static str>)>,
    }

    impl TextClassificationBackend for TableBackend {
        fn predict_batch(
            &self,
            texts: &[&str],
        ) -> Result<Vec<Result<RawPrediction, ClassifierError>>, ClassifierError> {
            texts
                .iter()
                .map(|text| -> Result<Result<RawPrediction, ClassifierError>, ClassifierError> {
                    let (_, row) = self
                        .rows
                        .iter()
                        .find(|(t, _)| t == text)
                        .ok_or_else(|| ClassifierError::Inference(format!("no row for {text}")))?;
                    Ok(match row {
                        Ok((label, score)) => Ok(RawPrediction {
                            label: (*label).to_string(),
                            score: *score,
                        }),
                        Err(reason) => Err(ClassifierError::Inference((*reason).to_string())),
                    })
                })
                .collect()
        }
    }

    struct DownBackend;

    impl TextClassificationBackend for DownBackend {
        fn predict_batch(
            &self,
            _texts: &[&str],
        ) -> Result<Vec<Result<RawPrediction, ClassifierError>>, ClassifierError> {
            Err(ClassifierError::Load("weights missing".to_string()))
        }
    }

    #[test]
    fn maps_raw_labels_in_input_order() {
        let classifier = ModelClassifier::new(TableBackend {
            rows: vec![
                ("Shares plunge", Ok(("NEGATIVE", 0.97))),
                ("Record quarter", Ok(("positive", 0.91))),
            ],
        });
        let results = classifier
            .classify(&["Record quarter", "Shares plunge"])
            .unwrap();
        assert_eq!(
            results,
            vec![
                SentimentResult {
                    label: SentimentLabel::Positive,
                    confidence: 0.91
                },
                SentimentResult {
                    label: SentimentLabel::Negative,
                    confidence: 0.97
                },
            ]
        );
    }

    #[test]
    fn neutral_label_fails_the_batch() {
        let classifier = ModelClassifier::new(TableBackend {
            rows: vec![
                ("Record quarter", Ok(("POSITIVE", 0.9))),
                ("Board meets", Ok(("NEUTRAL", 0.8))),
            ],
        });
        let err = classifier
            .classify(&["Record quarter", "Board meets"])
            .unwrap_err();
        assert!(
            matches!(err, ClassifierError::UnknownLabel(ref l) if l == "NEUTRAL"),
            "got: {err:?}"
        );
    }

    #[test]
    fn per_headline_failure_names_the_headline_index() {
        let classifier = ModelClassifier::new(TableBackend {
            rows: vec![
                ("ok", Ok(("POSITIVE", 0.6))),
                ("bad", Err("tokenizer rejected input")),
            ],
        });
        let err = classifier.classify(&["ok", "bad"]).unwrap_err();
        assert!(
            matches!(err, ClassifierError::Inference(ref m) if m == "headline #1: tokenizer rejected input"),
            "got: {err:?}"
        );
    }

    #[test]
    fn batch_failure_is_passed_through() {
        let classifier = ModelClassifier::new(DownBackend);
        let err = classifier.classify(&["anything"]).unwrap_err();
        assert!(matches!(err, ClassifierError::Load(_)), "got: {err:?}");
    }

    #[test]
    fn empty_batch_is_empty() {
        let classifier = ModelClassifier::new(TableBackend { rows: vec![] });
        assert!(classifier.classify(&[]).unwrap().is_empty());
    }
}
