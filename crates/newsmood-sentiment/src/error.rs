use thiserror::Error;

/// Failure fetching headlines from the news-search API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    ///
    /// The wrapped error has its URL stripped; the request URL is not logged
    /// or displayed.
    #[error("HTTP error")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status or an error envelope.
    ///
    /// `message` carries the upstream `message` field when the API sent one.
    #[error("news API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx body did not match the expected response shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Failure raised by a sentiment classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The inference call itself failed (resource exhaustion, backend crash, ...).
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("unknown sentiment label '{0}'")]
    UnknownLabel(String),

    /// Model weights, tokenizer or config could not be fetched or loaded.
    #[error("failed to load sentiment model: {0}")]
    Load(String),
}

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("classifier returned {got} results for {expected} headlines")]
    LengthMismatch { expected: usize, got: usize },

    #[error("classifier returned confidence {confidence} for headline #{index}; expected a value in [0, 1]")]
    InvalidConfidence { index: usize, confidence: f32 },
}
