#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which sentiment classifier backs a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    /// Built-in word lexicon; no model files needed.
    #[default]
    Lexicon,
    /// DistilBERT fine-tuned on SST-2, run in-process.
    DistilBert,
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierKind::Lexicon => write!(f, "lexicon"),
            ClassifierKind::DistilBert => write!(f, "distilbert"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Credential for the news-search API. Never empty once loaded.
    pub news_api_key: String,
    pub news_api_base_url: String,
    /// How far back (in days) a headline still counts as recent.
    pub lookback_days: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub classifier: ClassifierKind,
    /// Directory holding (or receiving) the DistilBERT model files.
    pub model_dir: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("news_api_key", &"[redacted]")
            .field("news_api_base_url", &self.news_api_base_url)
            .field("lookback_days", &self.lookback_days)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("classifier", &self.classifier)
            .field("model_dir", &self.model_dir)
            .finish()
    }
}
