//! Per-file history queries
//!
//! Each query runs exactly one `git log` process for the file and parses its
//! output. Queries share no mutable state, so one [`HistoryQuery`] can be
//! used from many threads at once.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;

use crate::git::constants::DEFAULT_LOG_LIMIT;
use crate::git::parser::Parser;
use crate::git::{CommandRunner, GitError, GitExecutor};
use crate::model::LogRecord;

/// Read-only history facts for files tracked by git
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    executor: GitExecutor,
}

impl HistoryQuery {
    /// Query from this crate's own source directory
    pub fn new() -> Self {
        Self {
            executor: GitExecutor::new(),
        }
    }

    /// Query from an explicit working directory
    pub fn with_work_dir(path: PathBuf) -> Self {
        Self {
            executor: GitExecutor::with_work_dir(path),
        }
    }

    /// Build on an already configured executor
    pub fn from_executor(executor: GitExecutor) -> Self {
        Self { executor }
    }

    /// Replace the subprocess runner
    pub fn with_runner(self, runner: Arc<dyn CommandRunner>) -> Self {
        Self::from_executor(self.executor.with_runner(runner))
    }

    /// Kill git and fail with [`GitError::Timeout`] after `timeout`
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self::from_executor(self.executor.with_timeout(timeout))
    }

    pub fn work_dir(&self) -> &Path {
        self.executor.work_dir()
    }

    pub fn executor(&self) -> &GitExecutor {
        &self.executor
    }

    /// Full id of the most recent commit touching `filename`
    ///
    /// `Ok(None)` when the file has no history or the output holds no
    /// commit marker.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn latest_commit_hash(&self, filename: &str) -> Result<Option<String>, GitError> {
        let output = self.executor.log_raw(filename, 1)?;
        Ok(Parser::parse_commit_hash(&output))
    }

    /// Author date of the most recent commit touching `filename`
    ///
    /// `Ok(None)` when the file has no history, the header has no date line,
    /// or the date cannot be parsed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn latest_modified_time(
        &self,
        filename: &str,
    ) -> Result<Option<OffsetDateTime>, GitError> {
        let output = self.executor.log_raw(filename, 1)?;
        Ok(Parser::parse_modified_time(&output))
    }

    /// Up to `limit` commits touching `filename`, newest first
    ///
    /// `limit` defaults to [`DEFAULT_LOG_LIMIT`] and must be positive.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn commit_log(
        &self,
        filename: &str,
        limit: Option<usize>,
    ) -> Result<Vec<LogRecord>, GitError> {
        let limit = limit.unwrap_or(DEFAULT_LOG_LIMIT);
        if limit == 0 {
            return Err(GitError::InvalidLimit(limit));
        }

        let output = self.executor.log_raw(filename, limit)?;
        let records = Parser::parse_log(&output);
        tracing::debug!(count = records.len(), "parsed commit log");
        Ok(records)
    }
}
