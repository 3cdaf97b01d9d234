//! git command execution layer
//!
//! This module handles executing `git log` and parsing its output.

pub mod constants;
mod executor;
/// Parser module (public for integration testing)
pub mod parser;
mod runner;

pub use executor::{DEFAULT_WORK_DIR, GitExecutor};
pub use runner::{CommandRunner, ProcessRunner, RunOutput};

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when executing git commands
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("git failed (exit code {exit_code:?}): {stderr}")]
    QueryFailed {
        stderr: String,
        exit_code: Option<i32>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("git is not installed or not in PATH")]
    GitNotFound,

    #[error("git did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Log limit must be a positive integer, got {0}")]
    InvalidLimit(usize),
}

impl GitError {
    /// True when git ran and reported a non-success status
    pub fn is_query_failure(&self) -> bool {
        matches!(self, Self::QueryFailed { .. } | Self::NotARepository)
    }
}
