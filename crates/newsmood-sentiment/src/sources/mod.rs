//! Headline source abstractions.

mod newsapi;

use std::collections::HashSet;
use std::future::Future;

pub use newsapi::NewsApiClient;

use crate::error::FetchError;

/// Anything that can produce recent headlines for a query.
///
/// Implementations apply the lookback window, drop items without a title,
/// and deduplicate by exact (case-sensitive) match. An empty set means
/// "nothing found" and is not an error.
pub trait HeadlineSource {
    fn fetch(
        &self,
        query: &str,
        lookback_days: u32,
    ) -> impl Future<Output = Result<HashSet<String>, FetchError>> + Send;
}
