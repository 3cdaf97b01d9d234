//! Data models for githist
//!
//! Plain data structures produced by the history queries.

mod log_record;

pub use log_record::LogRecord;
