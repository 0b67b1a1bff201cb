use std::time::Duration;

use async_trait::async_trait;

use crate::search::{NewsClient, NewsRecord, QueryOutcome};

/// Source of per-keyword query outcomes; the seam that lets batch tests
/// run against canned data instead of the network.
#[async_trait]
pub trait NewsSource {
    async fn query(&self, keyword: &str, max_results: usize) -> QueryOutcome;
}

#[async_trait]
impl NewsSource for NewsClient {
    async fn query(&self, keyword: &str, max_results: usize) -> QueryOutcome {
        NewsClient::query(self, keyword, max_results).await
    }
}

/// Delay policy applied between keyword queries, a throttle against
/// rate limiting by the feed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    None,
    Fixed(Duration),
}

impl Pacing {
    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Pacing::None
        } else {
            Pacing::Fixed(Duration::from_millis(ms))
        }
    }

    async fn wait(&self) {
        if let Pacing::Fixed(delay) = self {
            tokio::time::sleep(*delay).await;
        }
    }
}

/// Receives `(completed, total, keyword)` after each keyword finishes
pub trait ProgressSink {
    fn report(&mut self, completed: usize, total: usize, keyword: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(usize, usize, &str),
{
    fn report(&mut self, completed: usize, total: usize, keyword: &str) {
        self(completed, total, keyword)
    }
}

/// Run every keyword against the source in order and concatenate the
/// resulting records into one flat collection.
///
/// Failed keywords contribute their single synthetic error record, so n
/// keywords always yield n segments and processing never aborts mid-batch.
/// Output ordering equals keyword-list order; within a keyword, feed order.
pub async fn run_batch<S, P>(
    source: &S,
    keywords: &[String],
    per_keyword_cap: usize,
    pacing: Pacing,
    sink: &mut P,
) -> Vec<NewsRecord>
where
    S: NewsSource + Sync,
    P: ProgressSink,
{
    let total = keywords.len();
    let mut results = Vec::new();

    for (i, keyword) in keywords.iter().enumerate() {
        let keyword = keyword.trim();

        let outcome = source.query(keyword, per_keyword_cap).await;
        results.extend(outcome.into_records(keyword));

        sink.report(i + 1, total, keyword);

        if i + 1 < total {
            pacing.wait().await;
        }
    }

    results
}
