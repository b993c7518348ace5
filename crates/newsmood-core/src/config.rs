use crate::app_config::{AppConfig, ClassifierKind, Environment};
use crate::ConfigError;

/// Lookback window applied when `NEWSMOOD_LOOKBACK_DAYS` is unset.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Production news-search endpoint root.
pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2/";
pub const DEFAULT_USER_AGENT: &str = "newsmood/0.1 (headline-sentiment)";
const DEFAULT_MODEL_DIR: &str = "models/distilbert-sst2";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // A blank credential is as unusable as an absent one.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let news_api_key = require("NEWSAPI_KEY")?;

    let env = parse_environment(&or_default("NEWSMOOD_ENV", "development"))?;
    let log_level = or_default("NEWSMOOD_LOG_LEVEL", "info");
    let news_api_base_url = or_default("NEWSMOOD_NEWSAPI_BASE_URL", DEFAULT_NEWS_API_BASE_URL);

    let lookback_days = parse_u32(
        "NEWSMOOD_LOOKBACK_DAYS",
        &DEFAULT_LOOKBACK_DAYS.to_string(),
    )?;
    if lookback_days == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSMOOD_LOOKBACK_DAYS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("NEWSMOOD_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("NEWSMOOD_USER_AGENT", DEFAULT_USER_AGENT);
    let classifier = parse_classifier_kind(&or_default("NEWSMOOD_CLASSIFIER", "lexicon"))?;
    let model_dir = or_default("NEWSMOOD_MODEL_DIR", DEFAULT_MODEL_DIR);

    Ok(AppConfig {
        env,
        log_level,
        news_api_key,
        news_api_base_url,
        lookback_days,
        request_timeout_secs,
        user_agent,
        classifier,
        model_dir,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSMOOD_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parse a classifier name as accepted by `NEWSMOOD_CLASSIFIER` and `--classifier`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for names other than `lexicon` and
/// `distilbert`.
pub fn parse_classifier_kind(s: &str) -> Result<ClassifierKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "lexicon" => Ok(ClassifierKind::Lexicon),
        "distilbert" => Ok(ClassifierKind::DistilBert),
        _ => Err(ConfigError::InvalidEnvVar {
            var: "NEWSMOOD_CLASSIFIER".to_string(),
            reason: format!("unknown classifier '{s}' (expected lexicon or distilbert)"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
