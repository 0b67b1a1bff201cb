use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::models::{FailureKind, NewsRecord, QueryFailure, QueryOutcome};
use super::parser::parse_news;
use crate::config::{AppConfig, SearchConfig};
use crate::Result;

const SEARCH_URL: &str = "https://news.google.com/rss/search";

/// Feed query engine: one Google News RSS request per keyword.
///
/// All failure modes surface as a [`QueryOutcome::Failed`] value so a batch
/// caller can keep going; nothing here returns an error after construction.
pub struct NewsClient {
    client: Client,
    search: SearchConfig,
}

impl NewsClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.search.request_timeout_secs))
            .user_agent(config.search.user_agent.clone())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            search: config.search.clone(),
        })
    }

    /// Build the search URL for a keyword, percent-encoding the query and
    /// pinning the configured locale parameters.
    pub fn build_search_url(&self, keyword: &str) -> Result<Url> {
        let mut url = Url::parse(SEARCH_URL)?;
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("hl", &self.search.hl)
            .append_pair("gl", &self.search.gl)
            .append_pair("ceid", &self.search.ceid);
        Ok(url)
    }

    /// Query the feed source for one keyword, returning up to `max_results`
    /// records in feed order.
    pub async fn query(&self, keyword: &str, max_results: usize) -> QueryOutcome {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return QueryOutcome::Failed(QueryFailure::new(
                FailureKind::InvalidKeyword,
                "keyword is empty after trimming",
            ));
        }

        let url = match self.build_search_url(keyword) {
            Ok(url) => url,
            Err(e) => {
                return QueryOutcome::Failed(QueryFailure::new(FailureKind::Request, e.to_string()))
            }
        };

        tracing::debug!("Fetching news feed: {}", url);

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                return QueryOutcome::Failed(QueryFailure::new(FailureKind::Request, e.to_string()))
            }
        };

        let status = response.status();
        if !status.is_success() {
            return QueryOutcome::Failed(QueryFailure::new(
                FailureKind::Status,
                format!("HTTP {} for URL: {}", status, url),
            ));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return QueryOutcome::Failed(QueryFailure::new(FailureKind::Request, e.to_string()))
            }
        };

        match parse_news(&body, keyword, max_results) {
            Ok(records) => {
                tracing::info!("Keyword '{}': {} records", keyword, records.len());
                QueryOutcome::Fetched(records)
            }
            Err(e) => QueryOutcome::Failed(QueryFailure::new(FailureKind::Parse, e.to_string())),
        }
    }

    /// Like [`Self::query`], but with a failure already flattened into the
    /// single synthetic error record.
    pub async fn query_records(&self, keyword: &str, max_results: usize) -> Vec<NewsRecord> {
        self.query(keyword, max_results)
            .await
            .into_records(keyword.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::models::RecordStatus;

    #[test]
    fn test_build_search_url_encodes_keyword() {
        let client = NewsClient::new(&AppConfig::default()).unwrap();
        let url = client.build_search_url("台積電").unwrap();

        assert!(url.as_str().starts_with("https://news.google.com/rss/search?"));
        assert!(url.as_str().contains("q=%E5%8F%B0%E7%A9%8D%E9%9B%BB"));
        assert!(url.as_str().contains("hl=zh-TW"));
        assert!(url.as_str().contains("gl=TW"));
        assert!(url.as_str().contains("ceid=TW%3Azh-Hant"));
    }

    #[test]
    fn test_build_search_url_spaces() {
        let client = NewsClient::new(&AppConfig::default()).unwrap();
        let url = client.build_search_url("tsmc earnings").unwrap();

        assert!(url.as_str().contains("q=tsmc+earnings"));
    }

    #[tokio::test]
    async fn test_query_empty_keyword_fails_without_network() {
        let client = NewsClient::new(&AppConfig::default()).unwrap();

        match client.query("   ", 10).await {
            QueryOutcome::Failed(failure) => {
                assert_eq!(failure.kind, FailureKind::InvalidKeyword);
            }
            QueryOutcome::Fetched(_) => panic!("empty keyword must not fetch"),
        }
    }

    #[tokio::test]
    async fn test_query_records_never_returns_empty_on_failure() {
        let client = NewsClient::new(&AppConfig::default()).unwrap();

        let records = client.query_records("", 10).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, RecordStatus::FetchFailed);
    }
}
