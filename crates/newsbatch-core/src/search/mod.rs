mod client;
mod models;
mod parser;

pub use client::NewsClient;
pub use models::{
    FailureKind, NewsRecord, QueryFailure, QueryOutcome, RecordStatus, DEFAULT_SOURCE,
    ERROR_TITLE, SUMMARY_PLACEHOLDER, UNKNOWN_DATE,
};
pub use parser::normalize_pub_date;
