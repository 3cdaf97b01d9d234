//! Command-line interface for the `githist` binary

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::history::HistoryQuery;
use crate::model::LogRecord;

#[derive(Debug, Parser)]
#[command(name = "githist")]
#[command(about = "Per-file git history metadata", long_about = None)]
pub struct Cli {
    /// Run git from this directory (default: current directory)
    #[arg(short = 'C', long, global = true, env = "GITHIST_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Kill git after this many seconds
    #[arg(
        long,
        global = true,
        env = "GITHIST_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the latest commit hash touching a file
    Hash {
        /// Path of the file, relative to the working directory
        file: String,
    },

    /// Print the latest modification time of a file
    Mtime {
        /// Path of the file, relative to the working directory
        file: String,
    },

    /// Print the commit log of a file, newest first
    Log {
        /// Path of the file, relative to the working directory
        file: String,

        /// Maximum number of commits (default: 100)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,
    },
}

/// Modification time as printed by `githist mtime --json`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ModifiedTime {
    pub rfc3339: String,
    pub unix_millis: i64,
}

impl ModifiedTime {
    pub fn from_datetime(dt: OffsetDateTime) -> color_eyre::Result<Self> {
        Ok(Self {
            rfc3339: dt.format(&Rfc3339)?,
            unix_millis: dt.unix_timestamp() * 1000 + i64::from(dt.millisecond()),
        })
    }
}

impl Cli {
    /// Build the query this invocation describes
    pub fn query(&self) -> color_eyre::Result<HistoryQuery> {
        let work_dir = match &self.work_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let query = HistoryQuery::with_work_dir(work_dir);
        Ok(match self.timeout {
            Some(secs) => query.with_timeout(Duration::from_secs(secs)),
            None => query,
        })
    }
}

/// Log the git version at debug level
///
/// Spawns `git --version` only when debug events would be recorded.
pub fn log_git_version(query: &HistoryQuery) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    match query.executor().version() {
        Ok(version) => tracing::debug!(%version, "found git"),
        Err(err) => tracing::debug!(%err, "could not determine git version"),
    }
}

/// Run the selected subcommand, writing results to `out`
pub fn execute(cli: &Cli, query: &HistoryQuery, out: &mut impl Write) -> color_eyre::Result<()> {
    match &cli.command {
        Commands::Hash { file } => {
            let hash = query.latest_commit_hash(file)?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string(&hash)?)?;
            } else if let Some(hash) = hash {
                writeln!(out, "{hash}")?;
            }
        }
        Commands::Mtime { file } => {
            let modified = query
                .latest_modified_time(file)?
                .map(ModifiedTime::from_datetime)
                .transpose()?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string(&modified)?)?;
            } else if let Some(modified) = modified {
                writeln!(out, "{} {}", modified.rfc3339, modified.unix_millis)?;
            }
        }
        Commands::Log { file, limit } => {
            let limit = limit.map(usize::try_from).transpose()?;
            let records = query.commit_log(file, limit)?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
            } else {
                write_records(out, &records)?;
            }
        }
    }
    Ok(())
}

fn write_records(out: &mut impl Write, records: &[LogRecord]) -> std::io::Result<()> {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{record}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{CommandRunner, GitError, RunOutput};
    use insta::assert_snapshot;
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use time::macros::datetime;

    struct Canned(RunOutput);

    impl CommandRunner for Canned {
        fn run(
            &self,
            _program: &str,
            _args: &[&str],
            _cwd: Option<&Path>,
        ) -> Result<RunOutput, GitError> {
            Ok(self.0.clone())
        }
    }

    /// Counts invocations, replying with a version string
    #[derive(Default)]
    struct Counting(AtomicUsize);

    impl CommandRunner for Counting {
        fn run(
            &self,
            _program: &str,
            _args: &[&str],
            _cwd: Option<&Path>,
        ) -> Result<RunOutput, GitError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(RunOutput::success("git version 2.43.0\n"))
        }
    }

    const LOG_OUTPUT: &str = "commit 3f2a8c1e9b7d6f5a4c3b2a1908f7e6d5c4b3a291
Author: Jane Doe <jane@example.com>
Date:   Wed Jan 17 09:00:00 2024 +0000

    fix bug
    in parser

commit a1b2c3d4e5f60718293a4b5c6d7e8f9012345678
Author: John Roe <john@example.com>
Date:   Tue Jan 16 12:00:00 2024 +0000

    Initial import
";

    fn run_cli(args: &[&str], stdout: &str) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let query = HistoryQuery::with_work_dir(PathBuf::from("/repo"))
            .with_runner(Arc::new(Canned(RunOutput::success(stdout))));
        let mut out = Vec::new();
        execute(&cli, &query, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "githist", "-C", "/docs", "--timeout", "5", "-vv", "log", "guide.md", "-n", "3",
        ])
        .unwrap();

        assert_eq!(cli.work_dir, Some(PathBuf::from("/docs")));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Log { ref file, limit: Some(3) } if file == "guide.md"
        ));
    }

    #[test]
    fn test_zero_limit_rejected_by_parser() {
        assert!(Cli::try_parse_from(["githist", "log", "a.md", "-n", "0"]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected_by_parser() {
        assert!(Cli::try_parse_from(["githist", "--timeout", "0", "hash", "a.md"]).is_err());
        let cli = Cli::try_parse_from(["githist", "--timeout", "1", "hash", "a.md"]).unwrap();
        assert_eq!(cli.timeout, Some(1));
    }

    #[test]
    fn test_version_not_spawned_when_debug_disabled() {
        // No subscriber is installed in unit tests, so debug is disabled
        let runner = Arc::new(Counting::default());
        let query = HistoryQuery::with_work_dir(PathBuf::from("/repo")).with_runner(runner.clone());

        log_git_version(&query);

        assert_eq!(runner.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_version_spawned_when_debug_enabled() {
        let runner = Arc::new(Counting::default());
        let query = HistoryQuery::with_work_dir(PathBuf::from("/repo")).with_runner(runner.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::sink)
            .finish();

        tracing::subscriber::with_default(subscriber, || log_git_version(&query));

        assert_eq!(runner.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_query_uses_work_dir_flag() {
        let cli = Cli::try_parse_from(["githist", "-C", "/docs", "hash", "a.md"]).unwrap();
        assert_eq!(cli.query().unwrap().work_dir(), Path::new("/docs"));
    }

    #[test]
    fn test_hash_text() {
        let out = run_cli(&["githist", "hash", "a.md"], LOG_OUTPUT);
        assert_eq!(out, "3f2a8c1e9b7d6f5a4c3b2a1908f7e6d5c4b3a291\n");
    }

    #[test]
    fn test_hash_absent_prints_nothing() {
        assert_eq!(run_cli(&["githist", "hash", "a.md"], ""), "");
        assert_eq!(run_cli(&["githist", "--json", "hash", "a.md"], ""), "null\n");
    }

    #[test]
    fn test_mtime_text_and_json() {
        assert_eq!(
            run_cli(&["githist", "mtime", "a.md"], LOG_OUTPUT),
            "2024-01-17T09:00:00Z 1705482000000\n"
        );
        assert_eq!(
            run_cli(&["githist", "--json", "mtime", "a.md"], LOG_OUTPUT),
            "{\"rfc3339\":\"2024-01-17T09:00:00Z\",\"unix_millis\":1705482000000}\n"
        );
    }

    #[test]
    fn test_modified_time_keeps_offset() {
        let modified = ModifiedTime::from_datetime(datetime!(2024-01-15 10:30:00 +01:00)).unwrap();
        assert_eq!(modified.rfc3339, "2024-01-15T10:30:00+01:00");
        assert_eq!(modified.unix_millis, 1_705_311_000_000);
    }

    #[test]
    fn test_log_text() {
        let out = run_cli(&["githist", "log", "a.md"], LOG_OUTPUT);
        assert_snapshot!(out, @r"
        3f2a8c1e Wed Jan 17 09:00:00 2024 +0000 Jane Doe <jane@example.com>
            fix bug in parser

        a1b2c3d4 Tue Jan 16 12:00:00 2024 +0000 John Roe <john@example.com>
            Initial import
        ");
    }

    #[test]
    fn test_log_json() {
        let out = run_cli(&["githist", "--json", "log", "a.md"], LOG_OUTPUT);
        let records: Vec<LogRecord> = serde_json::from_str(&out).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].author, "John Roe <john@example.com>");
    }
}
