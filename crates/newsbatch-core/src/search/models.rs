use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed summary text; the engine never fetches article bodies.
pub const SUMMARY_PLACEHOLDER: &str = "click the link to view the full article";

/// Placeholder used when a feed entry carries no publication date.
pub const UNKNOWN_DATE: &str = "unknown date";

/// Title marker for the synthetic record produced by a failed query.
pub const ERROR_TITLE: &str = "[query failed]";

/// Publisher fallback when an entry has no nested source element.
pub const DEFAULT_SOURCE: &str = "Google News";

/// Whether a record came from a real feed entry or a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Ok,
    FetchFailed,
}

/// One normalized news item, immutable after construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecord {
    /// `YYYY-MM-DD HH:MM`, the raw feed string if unparseable, or [`UNKNOWN_DATE`]
    pub date: String,
    /// The keyword that produced this record
    pub query_target: String,
    pub title: String,
    pub link: String,
    pub source: String,
    pub summary: String,
    #[serde(default)]
    pub status: RecordStatus,
}

impl NewsRecord {
    /// Column headers in serialized field order
    pub const COLUMNS: [&'static str; 6] = ["date", "keyword", "title", "link", "source", "summary"];

    /// Field values in the same order as [`Self::COLUMNS`]
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.date,
            &self.query_target,
            &self.title,
            &self.link,
            &self.source,
            &self.summary,
        ]
    }

    /// Build the single synthetic record representing a failed keyword query
    pub fn from_failure(keyword: &str, failure: &QueryFailure) -> Self {
        Self {
            date: String::new(),
            query_target: keyword.to_string(),
            title: ERROR_TITLE.to_string(),
            link: String::new(),
            source: DEFAULT_SOURCE.to_string(),
            summary: failure.to_string(),
            status: RecordStatus::FetchFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Keyword was empty after trimming
    InvalidKeyword,
    /// Request construction or transport failure (includes timeouts)
    Request,
    /// Non-success HTTP status from the feed source
    Status,
    /// Response body was not a parseable feed
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::InvalidKeyword => "invalid keyword",
            FailureKind::Request => "request failed",
            FailureKind::Status => "bad status",
            FailureKind::Parse => "feed parse failed",
        };
        f.write_str(name)
    }
}

/// Structured failure detail for one keyword query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct QueryFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl QueryFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Typed result of one keyword query.
///
/// Failures never propagate as errors; callers that want a flat record
/// list convert with [`QueryOutcome::into_records`], which turns a
/// failure into exactly one marked record.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Fetched(Vec<NewsRecord>),
    Failed(QueryFailure),
}

impl QueryOutcome {
    pub fn into_records(self, keyword: &str) -> Vec<NewsRecord> {
        match self {
            QueryOutcome::Fetched(records) => records,
            QueryOutcome::Failed(failure) => vec![NewsRecord::from_failure(keyword, &failure)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_record_shape() {
        let failure = QueryFailure::new(FailureKind::Request, "connection refused");
        let record = NewsRecord::from_failure("tsmc", &failure);

        assert_eq!(record.title, ERROR_TITLE);
        assert_eq!(record.query_target, "tsmc");
        assert_eq!(record.date, "");
        assert_eq!(record.link, "");
        assert_eq!(record.summary, "request failed: connection refused");
        assert_eq!(record.status, RecordStatus::FetchFailed);
    }

    #[test]
    fn test_into_records_failure_yields_one_row() {
        let outcome = QueryOutcome::Failed(QueryFailure::new(FailureKind::Parse, "bad xml"));
        let records = outcome.into_records("晶片");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].query_target, "晶片");
        assert_eq!(records[0].status, RecordStatus::FetchFailed);
    }

    #[test]
    fn test_fields_match_column_order() {
        let record = NewsRecord {
            date: "2025-06-03 04:00".into(),
            query_target: "kw".into(),
            title: "t".into(),
            link: "l".into(),
            source: "s".into(),
            summary: "sum".into(),
            status: RecordStatus::Ok,
        };

        assert_eq!(NewsRecord::COLUMNS.len(), record.fields().len());
        assert_eq!(record.fields()[1], "kw");
        assert_eq!(record.fields()[5], "sum");
    }
}
