//! Commit log parser (git log -n <limit>)

use super::super::constants::markers;
use super::Parser;
use crate::model::LogRecord;

impl Parser {
    /// Parse multi-entry `git log` output into records, newest first
    ///
    /// Each commit marker starts a new record. `Author:` and `Date:` lines
    /// fill the current record's header fields; every other line is folded
    /// into its body. Lines before the first commit marker belong to no
    /// record and are dropped.
    pub fn parse_log(output: &str) -> Vec<LogRecord> {
        output.trim().lines().fold(Vec::new(), |mut records, line| {
            if let Some(commit) = Self::match_commit_line(line) {
                records.push(LogRecord::new(commit));
            } else if let Some(current) = records.last_mut() {
                if let Some(author) = line.strip_prefix(markers::AUTHOR) {
                    current.author = author.trim().to_string();
                } else if let Some(date) = line.strip_prefix(markers::DATE) {
                    current.date = date.trim().to_string();
                } else {
                    current.push_body(line);
                }
            }
            records
        })
    }
}
