//! git command executor
//!
//! Handles running git commands and capturing their output.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::GitError;
use super::constants::{self, commands, errors, flags, markers};
use super::runner::{CommandRunner, ProcessRunner};

/// Default working directory: the source directory of this module
pub const DEFAULT_WORK_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/src/git");

/// Executor for git commands
#[derive(Clone)]
pub struct GitExecutor {
    /// Directory git is run from
    work_dir: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for GitExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitExecutor")
            .field("work_dir", &self.work_dir)
            .finish_non_exhaustive()
    }
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor {
    /// Create a new executor rooted at [`DEFAULT_WORK_DIR`]
    pub fn new() -> Self {
        Self::with_work_dir(PathBuf::from(DEFAULT_WORK_DIR))
    }

    /// Create a new executor for a specific working directory
    pub fn with_work_dir(path: PathBuf) -> Self {
        Self {
            work_dir: path,
            runner: Arc::new(ProcessRunner::new()),
        }
    }

    /// Replace the subprocess runner
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Use a [`ProcessRunner`] that kills git after `timeout`
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_runner(Arc::new(ProcessRunner::with_timeout(timeout)))
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run a git command with the given arguments
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!(?args, work_dir = %self.work_dir.display(), "running git");

        let output = self
            .runner
            .run(constants::GIT_COMMAND, args, Some(&self.work_dir))?;

        if output.ok {
            tracing::trace!(bytes = output.stdout.len(), "git succeeded");
            Ok(output.stdout)
        } else {
            tracing::debug!(exit_code = ?output.exit_code, stderr = %output.stderr.trim(), "git failed");

            if output.stderr.contains(errors::NOT_A_REPO) {
                return Err(GitError::NotARepository);
            }

            Err(GitError::QueryFailed {
                stderr: output.stderr,
                exit_code: output.exit_code,
            })
        }
    }

    /// Get the git version
    pub fn version(&self) -> Result<String, GitError> {
        let output = self.run(&[flags::VERSION])?;
        // Output format: "git version 2.43.0"
        let trimmed = output.trim();
        Ok(trimmed
            .strip_prefix(markers::VERSION_PREFIX)
            .unwrap_or(trimmed)
            .to_string())
    }

    /// Run `git log -n <count> -- <filename>`
    pub fn log_raw(&self, filename: &str, count: usize) -> Result<String, GitError> {
        let count = count.to_string();
        self.run(&[
            commands::LOG,
            flags::MAX_COUNT,
            &count,
            flags::END_OF_OPTIONS,
            filename,
        ])
    }
}
