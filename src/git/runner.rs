//! Subprocess runner
//!
//! The seam between the history queries and the operating system. Queries
//! only need to know whether the command succeeded and what it printed.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::GitError;

/// How often a child is polled while a timeout is armed
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of one finished command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOutput {
    /// Did the command exit successfully?
    pub ok: bool,
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl RunOutput {
    /// Successful run with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            ok: true,
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// Failed run with the given stderr and exit code
    pub fn failure(stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            ok: false,
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
        }
    }
}

/// Runs an external program and captures its output
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, in `cwd` when given, and wait for it to exit
    ///
    /// A non-zero exit status is not an error at this level; it is reported
    /// through [`RunOutput::ok`].
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>)
    -> Result<RunOutput, GitError>;
}

/// [`CommandRunner`] backed by `std::process::Command`
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    /// Kill the child and fail if it runs longer than this (None = wait forever)
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Create a runner that waits for the child indefinitely
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Create a runner that gives up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<RunOutput, GitError> {
        // Drain both pipes on their own threads so a chatty child cannot
        // block on a full pipe while we poll it.
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(err) => {
                    reap(&mut child);
                    return Err(err.into());
                }
            }
            if started.elapsed() >= timeout {
                tracing::warn!(?timeout, "git timed out, killing child process");
                reap(&mut child);
                return Err(GitError::Timeout(timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        Ok(RunOutput {
            ok: status.success(),
            stdout: join_reader(stdout)?,
            stderr: join_reader(stderr)?,
            exit_code: status.code(),
        })
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<RunOutput, GitError> {
        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(dir) = cwd {
            // A missing cwd surfaces as NotFound from spawn, which would be
            // misreported as a missing git binary.
            if !dir.is_dir() {
                return Err(GitError::IoError(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("working directory {} does not exist", dir.display()),
                )));
            }
            cmd.current_dir(dir);
        }

        let map_spawn_err = |e: io::Error| {
            if e.kind() == io::ErrorKind::NotFound {
                GitError::GitNotFound
            } else {
                GitError::IoError(e)
            }
        };

        match self.timeout {
            None => {
                let output = cmd.output().map_err(map_spawn_err)?;
                Ok(RunOutput {
                    ok: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    exit_code: output.status.code(),
                })
            }
            Some(timeout) => {
                let child = cmd
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()
                    .map_err(map_spawn_err)?;
                Self::wait_with_timeout(child, timeout)
            }
        }
    }
}

/// Kill a child we are giving up on and wait for it to exit
///
/// Errors are ignored: the child may already have exited, and the caller
/// is about to report its own error.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_reader(handle: Option<thread::JoinHandle<io::Result<Vec<u8>>>>) -> Result<String, GitError> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| io::Error::other("output reader thread panicked"))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
