pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod keywords;
pub mod search;

pub use config::AppConfig;
pub use error::{Error, Result};
