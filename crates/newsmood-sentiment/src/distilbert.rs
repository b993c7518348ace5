//! In-process DistilBERT sentiment model (SST-2 fine-tune).
//!
//! Model files live in a local directory and are downloaded on first use.
//! Inference runs on the CPU, one headline at a time, so no padding mask is
//! needed.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use candle_core::{DType, Device, Tensor, D};
use candle_nn::{linear, Linear, Module, VarBuilder};
use candle_transformers::models::distilbert::{Config as DistilBertConfig, DistilBertModel};
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};

use crate::error::ClassifierError;
use crate::model::{ModelClassifier, RawPrediction, TextClassificationBackend};

const MODEL_FILE: &str = "model.safetensors";
const CONFIG_FILE: &str = "config.json";
const TOKENIZER_FILE: &str = "tokenizer.json";

const MODEL_URL: &str = "https://huggingface.co/distilbert/distilbert-base-uncased-finetuned-sst-2-english/resolve/main/model.safetensors";
const CONFIG_URL: &str = "https://huggingface.co/distilbert/distilbert-base-uncased-finetuned-sst-2-english/resolve/main/config.json";
// The fine-tune reuses the base model's vocabulary; only the base repo ships tokenizer.json.
const TOKENIZER_URL: &str =
    "https://huggingface.co/distilbert/distilbert-base-uncased/resolve/main/tokenizer.json";

const MAX_TOKENS: usize = 512;

/// Fields of `config.json` the classification head needs.
#[derive(Debug, Deserialize)]
struct HeadConfig {
    dim: usize,
    id2label: HashMap<String, String>,
}

/// DistilBERT encoder plus the SST-2 classification head.
pub struct DistilBertBackend {
    model: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    id2label: HashMap<usize, String>,
    device: Device,
}

impl std::fmt::Debug for DistilBertBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistilBertBackend")
            .field("id2label", &self.id2label)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl DistilBertBackend {
    /// Load weights, config and tokenizer from `model_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::Load`] if a file is missing or malformed.
    pub fn load(model_dir: &Path) -> Result<Self, ClassifierError> {
        let device = Device::Cpu;
        tracing::info!(dir = %model_dir.display(), "loading DistilBERT sentiment model");

        let config_text = std::fs::read_to_string(model_dir.join(CONFIG_FILE))
            .map_err(|e| load_error(CONFIG_FILE, e))?;
        let config: DistilBertConfig =
            serde_json::from_str(&config_text).map_err(|e| load_error(CONFIG_FILE, e))?;
        let head: HeadConfig =
            serde_json::from_str(&config_text).map_err(|e| load_error(CONFIG_FILE, e))?;
        let id2label = parse_id2label(head.id2label)?;

        let weights =
            std::fs::read(model_dir.join(MODEL_FILE)).map_err(|e| load_error(MODEL_FILE, e))?;
        let tensors = candle_core::safetensors::load_buffer(&weights, &device)
            .map_err(|e| load_error(MODEL_FILE, e))?;
        let vb = VarBuilder::from_tensors(tensors, DType::F32, &device);

        let model = DistilBertModel::load(vb.pp("distilbert"), &config)
            .map_err(|e| load_error(MODEL_FILE, e))?;
        let pre_classifier = linear(head.dim, head.dim, vb.pp("pre_classifier"))
            .map_err(|e| load_error(MODEL_FILE, e))?;
        let classifier = linear(head.dim, id2label.len(), vb.pp("classifier"))
            .map_err(|e| load_error(MODEL_FILE, e))?;

        let mut tokenizer = Tokenizer::from_file(model_dir.join(TOKENIZER_FILE))
            .map_err(|e| load_error(TOKENIZER_FILE, e))?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..TruncationParams::default()
            }))
            .map_err(|e| load_error(TOKENIZER_FILE, e))?;

        tracing::info!(labels = id2label.len(), "DistilBERT sentiment model loaded");
        Ok(Self {
            model,
            pre_classifier,
            classifier,
            tokenizer,
            id2label,
            device,
        })
    }

    fn class_probabilities(&self, ids: &[u32]) -> candle_core::Result<Vec<f32>> {
        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        // Nonzero entries are masked out; an unpadded sequence masks nothing.
        let mask = Tensor::zeros((ids.len(), ids.len()), DType::U8, &self.device)?;
        let hidden = self.model.forward(&input_ids, &mask)?;
        let cls = hidden.narrow(1, 0, 1)?.squeeze(1)?;
        let pooled = self.pre_classifier.forward(&cls)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;
        candle_nn::ops::softmax(&logits, D::Minus1)?
            .squeeze(0)?
            .to_vec1::<f32>()
    }

    fn predict(&self, text: &str) -> Result<RawPrediction, ClassifierError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::Inference(format!("tokenization failed: {e}")))?;
        let probs = self
            .class_probabilities(encoding.get_ids())
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let (class_id, score) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| ClassifierError::Inference("model returned no classes".to_string()))?;
        let label = self.id2label.get(&class_id).cloned().ok_or_else(|| {
            ClassifierError::Inference(format!("predicted class {class_id} has no label"))
        })?;

        Ok(RawPrediction { label, score })
    }
}

impl TextClassificationBackend for DistilBertBackend {
    fn predict_batch(
        &self,
        texts: &[&str],
    ) -> Result<Vec<Result<RawPrediction, ClassifierError>>, ClassifierError> {
        Ok(texts.iter().map(|text| self.predict(text)).collect())
    }
}

fn load_error(file: &str, e: impl std::fmt::Display) -> ClassifierError {
    ClassifierError::Load(format!("{file}: {e}"))
}

fn parse_id2label(raw: HashMap<String, String>) -> Result<HashMap<usize, String>, ClassifierError> {
    raw.into_iter()
        .map(|(id, label)| {
            id.parse::<usize>()
                .map(|id| (id, label))
                .map_err(|e| load_error(CONFIG_FILE, format!("id2label key '{id}': {e}")))
        })
        .collect()
}

/// Download any model file missing from `model_dir`.
///
/// # Errors
///
/// Returns [`ClassifierError::Load`] if the directory cannot be created or a
/// download fails.
pub async fn ensure_model_files(model_dir: &Path) -> Result<(), ClassifierError> {
    tokio::fs::create_dir_all(model_dir)
        .await
        .map_err(|e| load_error(&model_dir.display().to_string(), e))?;

    for (file, url) in [
        (CONFIG_FILE, CONFIG_URL),
        (TOKENIZER_FILE, TOKENIZER_URL),
        (MODEL_FILE, MODEL_URL),
    ] {
        let path = model_dir.join(file);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }
        tracing::info!(file, url, "downloading model file");
        let bytes = reqwest::get(url)
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| load_error(file, e))?
            .bytes()
            .await
            .map_err(|e| load_error(file, e))?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| load_error(file, e))?;
        tracing::info!(file, bytes = bytes.len(), "model file saved");
    }
    Ok(())
}

/// Process-wide DistilBERT classifier, downloaded and loaded on first use.
///
/// # Errors
///
/// Returns [`ClassifierError::Load`] if the model cannot be fetched or
/// loaded. A failed load is retried on the next call.
pub async fn shared_distilbert_classifier(
    model_dir: &Path,
) -> Result<&'static ModelClassifier<DistilBertBackend>, ClassifierError> {
    static CLASSIFIER: OnceLock<ModelClassifier<DistilBertBackend>> = OnceLock::new();
    if let Some(classifier) = CLASSIFIER.get() {
        return Ok(classifier);
    }
    ensure_model_files(model_dir).await?;
    let backend = DistilBertBackend::load(model_dir)?;
    Ok(CLASSIFIER.get_or_init(|| ModelClassifier::new(backend)))
}
