//! git-specific constants
//!
//! Centralized definitions for the git command name, flags, and defaults.

/// git command binary name
pub const GIT_COMMAND: &str = "git";

/// Number of entries returned by `commit_log` when no limit is given
pub const DEFAULT_LOG_LIMIT: usize = 100;

/// Length of a full (SHA-1) commit id in hex characters
pub const COMMIT_ID_LEN: usize = 40;

/// Length of the abbreviated commit id used for display
pub const SHORT_COMMIT_LEN: usize = 8;

/// git subcommands
pub mod commands {
    pub const LOG: &str = "log";
}

/// git command flags
pub mod flags {
    /// Limit the number of log entries
    pub const MAX_COUNT: &str = "-n";
    /// Separates revisions from paths so filenames are never taken as revs
    pub const END_OF_OPTIONS: &str = "--";
    /// Show version
    pub const VERSION: &str = "--version";
}

/// Prefixes of the medium-format `git log` header lines
pub mod markers {
    pub const AUTHOR: &str = "Author:";
    pub const DATE: &str = "Date:";

    /// Version output prefix (e.g., "git version 2.43.0")
    pub const VERSION_PREFIX: &str = "git version ";
}

/// Error detection patterns in git output
pub mod errors {
    /// Pattern indicating the working directory is not inside a repository
    pub const NOT_A_REPO: &str = "not a git repository";
}
