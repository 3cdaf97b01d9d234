//! githist - per-file git history metadata
//!
//! Recovers the latest commit hash, the latest modification time and a
//! bounded commit log for a file by running `git log` and parsing its output.
//! Intended for documentation and build tools that embed "last updated"
//! information.
//!
//! This library provides:
//! - [`history`]: The three history queries
//! - [`git`]: git command execution and parsing
//! - [`model`]: Domain models
//! - [`cli`]: Command-line front end used by the `githist` binary
//! - [`logging`]: Diagnostic logging setup

pub mod cli;
pub mod git;
pub mod history;
pub mod logging;
pub mod model;

pub use git::GitError;
pub use history::HistoryQuery;
pub use model::LogRecord;
