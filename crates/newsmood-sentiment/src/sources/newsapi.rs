//! HTTP client for the `NewsAPI` `everything` search endpoint.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};
use newsmood_core::{AppConfig, DEFAULT_NEWS_API_BASE_URL, DEFAULT_USER_AGENT};
use reqwest::{Client, Url};
use serde::Deserialize;

use super::HeadlineSource;
use crate::error::FetchError;

/// Header carrying the API key, so the key never appears in a request URL.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Shown when the API fails without saying why.
const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch news.";

/// Title `NewsAPI` substitutes for withdrawn articles.
const REMOVED_TITLE: &str = "[Removed]";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
}

/// Client for the news-search API.
///
/// Use [`NewsApiClient::new`] for production or
/// [`NewsApiClient::with_base_url`] to point at a mock server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_NEWS_API_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`FetchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, FetchError> {
        Self::build(api_key, timeout_secs, base_url, DEFAULT_USER_AGENT)
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`NewsApiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::build(
            &config.news_api_key,
            config.request_timeout_secs,
            &config.news_api_base_url,
            &config.user_agent,
        )
    }

    fn build(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("everything"))
            .map_err(|e| FetchError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Fetches the distinct titles of articles matching `query` published
    /// within the last `lookback_days` days.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Api`] on a non-2xx status or an error envelope, with
    ///   the upstream message when one was sent.
    /// - [`FetchError::Http`] on network failure.
    /// - [`FetchError::Deserialize`] if a 2xx body is not the expected shape.
    pub async fn fetch_headlines(
        &self,
        query: &str,
        lookback_days: u32,
    ) -> Result<HashSet<String>, FetchError> {
        let today = Utc::now().date_naive();
        let from = today
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN);
        let url = self.build_url(query, from);

        tracing::debug!(query, %from, "requesting headlines");
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(http_error)?;
        let status = response.status();
        let body = response.text().await.map_err(http_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<EverythingResponse>(&body)
                .ok()
                .and_then(|r| r.message);
            return Err(api_error(status.as_u16(), message));
        }

        let parsed: EverythingResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
                context: format!("everything(q={query})"),
                source: e,
            })?;

        if parsed.status.as_deref() == Some("error") {
            return Err(api_error(status.as_u16(), parsed.message));
        }

        let headlines = extract_headlines(parsed.articles.unwrap_or_default());
        tracing::debug!(query, count = headlines.len(), "fetched headlines");
        Ok(headlines)
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, query: &str, from: NaiveDate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("from", &from.format("%Y-%m-%d").to_string())
            .append_pair("sortBy", "publishedAt")
            .append_pair("language", "en");
        url
    }
}

impl HeadlineSource for NewsApiClient {
    fn fetch(
        &self,
        query: &str,
        lookback_days: u32,
    ) -> impl Future<Output = Result<HashSet<String>, FetchError>> + Send {
        self.fetch_headlines(query, lookback_days)
    }
}

fn http_error(e: reqwest::Error) -> FetchError {
    FetchError::Http(e.without_url())
}

fn api_error(status: u16, message: Option<String>) -> FetchError {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
    FetchError::Api { status, message }
}

/// Pulls usable titles out of raw article objects.
///
/// Articles that fail to parse are skipped rather than failing the batch.
fn extract_headlines(articles: Vec<serde_json::Value>) -> HashSet<String> {
    let mut headlines = HashSet::new();
    for value in articles {
        let article = match serde_json::from_value::<Article>(value) {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed article");
                continue;
            }
        };
        if let Some(title) = article.title {
            if !title.is_empty() && title != REMOVED_TITLE {
                headlines.insert(title);
            }
        }
    }
    headlines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> NewsApiClient {
        NewsApiClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://newsapi.org/v2");
        let url = client.build_url("Tesla", date(2024, 3, 1));
        assert_eq!(
            url.as_str(),
            "https://newsapi.org/v2/everything?q=Tesla&from=2024-03-01&sortBy=publishedAt&language=en"
        );
    }

    #[test]
    fn build_url_never_contains_the_api_key() {
        let client = NewsApiClient::with_base_url("SECRET-KEY-123", 30, "https://newsapi.org/v2")
            .expect("client construction should not fail");
        let url = client.build_url("Tesla", date(2024, 3, 1));
        assert!(!url.as_str().contains("SECRET-KEY-123"), "{url}");
    }

    #[test]
    fn build_url_tolerates_trailing_slash() {
        let client = test_client("https://newsapi.org/v2/");
        let url = client.build_url("TSLA", date(2024, 3, 1));
        assert!(
            url.as_str().starts_with("https://newsapi.org/v2/everything?"),
            "{url}"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://newsapi.org/v2");
        let url = client.build_url("AT&T earnings", date(2024, 3, 1));
        assert!(
            url.as_str().contains("q=AT%26T+earnings"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = NewsApiClient::with_base_url("k", 30, "not a url");
        assert!(matches!(result, Err(FetchError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn extract_headlines_skips_missing_empty_and_removed_titles() {
        let articles = vec![
            serde_json::json!({ "title": "Tesla stock soars" }),
            serde_json::json!({ "title": null }),
            serde_json::json!({ "title": "" }),
            serde_json::json!({ "description": "no title" }),
            serde_json::json!({ "title": "[Removed]" }),
        ];
        let headlines = extract_headlines(articles);
        assert_eq!(headlines.len(), 1);
        assert!(headlines.contains("Tesla stock soars"));
    }

    #[test]
    fn extract_headlines_dedups_exact_matches_only() {
        let articles = vec![
            serde_json::json!({ "title": "Tesla recalls cars" }),
            serde_json::json!({ "title": "Tesla recalls cars" }),
            serde_json::json!({ "title": "tesla recalls cars" }),
        ];
        let headlines = extract_headlines(articles);
        assert_eq!(headlines.len(), 2);
    }

    #[test]
    fn extract_headlines_skips_malformed_articles() {
        let articles = vec![
            serde_json::json!({ "title": 42 }),
            serde_json::json!("just a string"),
            serde_json::json!({ "title": "Valid headline" }),
        ];
        let headlines = extract_headlines(articles);
        assert_eq!(headlines.len(), 1);
        assert!(headlines.contains("Valid headline"));
    }

    #[test]
    fn api_error_falls_back_when_message_missing_or_blank() {
        assert!(matches!(
            api_error(500, None),
            FetchError::Api { status: 500, ref message } if message == FALLBACK_ERROR_MESSAGE
        ));
        assert!(matches!(
            api_error(401, Some("  ".to_string())),
            FetchError::Api { ref message, .. } if message == FALLBACK_ERROR_MESSAGE
        ));
        assert!(matches!(
            api_error(429, Some("slow down".to_string())),
            FetchError::Api { ref message, .. } if message == "slow down"
        ));
    }
}
