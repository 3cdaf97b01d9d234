//! Single-entry header parser (latest commit and date)

use time::OffsetDateTime;

use super::{DATE_LINE_REGEX, Parser, parse_git_date};

impl Parser {
    /// Commit id of the first commit marker in the output
    ///
    /// Returns `None` for empty output or when no line is a commit marker.
    pub fn parse_commit_hash(output: &str) -> Option<String> {
        let output = output.trim();
        if output.is_empty() {
            return None;
        }

        output
            .lines()
            .find_map(Self::match_commit_line)
            .map(str::to_string)
    }

    /// Text after the first `Date:` marker of the header block
    ///
    /// Scanning stops at the first blank line, which separates the header
    /// from the commit message.
    pub fn parse_date_text(output: &str) -> Option<&str> {
        for line in output.trim().lines() {
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            if let Some(caps) = DATE_LINE_REGEX.captures(line)
                && let Some(text) = caps.get(1)
            {
                return Some(text.as_str().trim());
            }
        }
        None
    }

    /// Modification time from the first `Date:` marker of the header block
    ///
    /// Unparseable date text is treated the same as a missing marker.
    pub fn parse_modified_time(output: &str) -> Option<OffsetDateTime> {
        let text = Self::parse_date_text(output)?;
        let parsed = parse_git_date(text);
        if parsed.is_none() {
            tracing::warn!(date = text, "unrecognised git date format");
        }
        parsed
    }
}
