//! TestRepo helper for integration tests.
//!
//! Provides a temporary git repository with deterministic commit dates.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Empty config file used in place of the user's global git config
#[cfg(windows)]
const NULL_CONFIG: &str = "NUL";
#[cfg(not(windows))]
const NULL_CONFIG: &str = "/dev/null";

/// A temporary git repository for testing.
///
/// The repository is automatically cleaned up when the TestRepo is dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new git repository in a temporary directory.
    ///
    /// `log.*` settings that change the `git log` output format are pinned
    /// in the repository config, so a developer's global config cannot
    /// reach the queries under test.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { dir };

        repo.git(&["init", "-q"], None);
        repo.git(&["config", "user.name", "Test User"], None);
        repo.git(&["config", "user.email", "test@example.com"], None);
        repo.git(&["config", "commit.gpgsign", "false"], None);
        repo.git(&["config", "log.date", "default"], None);
        repo.git(&["config", "log.abbrevCommit", "false"], None);
        repo.git(&["config", "log.showSignature", "false"], None);

        repo
    }

    /// Get the path to the repository root.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Execute a git command in this repository.
    ///
    /// `date` pins both the author and committer date.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute or returns a non-zero exit code.
    pub fn git(&self, args: &[&str], date: Option<&str>) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(self.path())
            .env("GIT_CONFIG_GLOBAL", NULL_CONFIG)
            .env("GIT_CONFIG_NOSYSTEM", "1");
        if let Some(date) = date {
            cmd.env("GIT_AUTHOR_DATE", date)
                .env("GIT_COMMITTER_DATE", date);
        }

        let output = cmd.output().expect("Failed to execute git command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file in the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Write, stage and commit a file at a fixed date, returning the new HEAD.
    ///
    /// `date` is anything git accepts in `GIT_AUTHOR_DATE`,
    /// e.g. `2024-01-15T10:30:00+01:00`.
    pub fn commit_file(&self, name: &str, content: &str, message: &str, date: &str) -> String {
        self.write_file(name, content);
        self.git(&["add", "--", name], None);
        self.git(&["commit", "-q", "-m", message], Some(date));
        self.head()
    }

    /// Set a repository-local config value.
    pub fn set_config(&self, key: &str, value: &str) {
        self.git(&["config", key, value], None);
    }

    /// Full id of HEAD.
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"], None).trim().to_string()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
