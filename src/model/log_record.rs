//! Commit record model for `git log` output

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::git::constants::SHORT_COMMIT_LEN;

/// One commit from the history of a file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogRecord {
    /// Full 40-character commit id
    pub commit: String,

    /// Author line (e.g., "Jane Doe <jane@example.com>"), may be empty
    pub author: String,

    /// Date line exactly as git printed it, unparsed
    pub date: String,

    /// Commit message fragments joined by single spaces
    pub body: String,
}

impl LogRecord {
    /// Start a record for a commit marker line
    pub fn new(commit: impl Into<String>) -> Self {
        Self {
            commit: commit.into(),
            ..Default::default()
        }
    }

    /// Append a message line to the body
    ///
    /// The fragment is trimmed and separated from existing text by exactly
    /// one space. Blank fragments leave the body untouched.
    pub fn push_body(&mut self, line: &str) {
        let fragment = line.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.body.is_empty() {
            self.body.push(' ');
        }
        self.body.push_str(fragment);
    }

    /// Get short commit id for display (first 8 chars)
    pub fn short_commit(&self) -> &str {
        self.commit
            .get(..SHORT_COMMIT_LEN)
            .unwrap_or(self.commit.as_str())
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.short_commit(), self.date, self.author)?;
        if !self.body.is_empty() {
            write!(f, "\n    {}", self.body)?;
        }
        Ok(())
    }
}
