//! History domain - recently used search terms

pub mod log;

pub use log::{SearchHistoryLog, DEFAULT_HISTORY_CAPACITY};
