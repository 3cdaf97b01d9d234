//! git log output parser
//!
//! Parses the medium-format output of `git log -n <count> -- <file>` into
//! structured data. Parsers never fail: anything they cannot recognise is
//! reported as "no data".

mod date;
mod header;
mod log;

pub use date::parse_git_date;


use regex::Regex;
use std::sync::LazyLock;

use super::constants::COMMIT_ID_LEN;

/// Regex for the commit marker line
/// Format: `commit <40 hex chars>` optionally followed by decorations
/// Example: `commit 3f2a...9c1e (HEAD -> main, origin/main)`
///
/// Groups:
/// 1. full commit id
static COMMIT_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^commit\s+([0-9a-f]{{{COMMIT_ID_LEN}}})"))
        .expect("Invalid commit line regex")
});

/// Regex for the date header line (matched against a trimmed line)
/// Example: `Date:   Mon Jan 15 10:30:00 2024 +0100`
static DATE_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^date:\s+(.*)$").expect("Invalid date line regex"));

/// Parser for git log output
pub struct Parser;

impl Parser {
    /// Extract the commit id if `line` is a commit marker
    fn match_commit_line(line: &str) -> Option<&str> {
        COMMIT_LINE_REGEX
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}
