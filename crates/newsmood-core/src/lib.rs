//! Shared configuration for the newsmood workspace.

mod app_config;
mod config;

use thiserror::Error;

pub use app_config::{AppConfig, ClassifierKind, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, parse_classifier_kind, DEFAULT_LOOKBACK_DAYS,
    DEFAULT_NEWS_API_BASE_URL, DEFAULT_USER_AGENT,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
