pub mod batch;
pub mod search;
