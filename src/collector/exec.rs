//! External command invocation with a bounded deadline.
//!
//! Several collectors consume OS tables through short-lived external
//! commands (`wc -l` over the conntrack table, `cat` over the ARP table,
//! the modem helper). The `CommandRunner` trait is the seam that makes
//! those collectors testable; the real implementation enforces a per-call
//! timeout so a wedged helper can never stall the refresh loop forever.

use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Interval between child liveness checks while waiting for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Error type for external command invocations.
#[derive(Debug)]
pub enum ExecError {
    /// The command could not be started.
    Spawn(io::Error),
    /// The command did not exit before the deadline and was killed.
    TimedOut,
    /// I/O error while waiting for the command.
    Io(io::Error),
}

impl std::fmt::Display for ExecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecError::Spawn(e) => write!(f, "failed to spawn: {}", e),
            ExecError::TimedOut => write!(f, "timed out"),
            ExecError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ExecError {}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    /// Whether the command exited with status zero.
    pub success: bool,
}

/// Abstraction over external command invocation.
pub trait CommandRunner {
    /// Runs `program` with `args`, captures its standard output, and kills
    /// the process if it has not exited before `timeout`.
    fn run(&self, program: &str, args: &[String], timeout: Duration)
    -> Result<CommandOutput, ExecError>;
}

/// Real implementation spawning through `std::process::Command`.
///
/// Standard output is drained on a scoped reader thread while the child is
/// polled against the deadline; both the pipe and the thread are released
/// before the call returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealRunner;

impl RealRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for RealRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, ExecError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(ExecError::Spawn)?;

        // Drain stdout concurrently so a chatty child cannot deadlock on a
        // full pipe while we wait for it.
        let mut pipe = child.stdout.take();
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(ref mut pipe) = pipe {
                let _ = pipe.read_to_end(&mut buf);
            }
            String::from_utf8_lossy(&buf).into_owned()
        });

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        debug!("command '{}' exceeded {:?}, killing", program, timeout);
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = reader.join();
                        return Err(ExecError::TimedOut);
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = reader.join();
                    return Err(ExecError::Io(e));
                }
            }
        };

        let stdout = reader.join().unwrap_or_default();
        Ok(CommandOutput {
            stdout,
            success: status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    #[cfg(unix)]
    fn test_run_captures_stdout() {
        let runner = RealRunner::new();
        let out = runner
            .run("echo", &args(&["hello"]), Duration::from_secs(5))
            .unwrap();
        assert_eq!(out.stdout, "hello\n");
        assert!(out.success);
    }

    #[test]
    #[cfg(unix)]
    fn test_run_reports_failure_status() {
        let runner = RealRunner::new();
        let out = runner
            .run("cat", &args(&["/nonexistent/table"]), Duration::from_secs(5))
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.stdout, "");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_kills_on_timeout() {
        let runner = RealRunner::new();
        let start = Instant::now();
        let result = runner.run("sleep", &args(&["5"]), Duration::from_millis(100));
        assert!(matches!(result, Err(ExecError::TimedOut)));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_run_missing_program_is_spawn_error() {
        let runner = RealRunner::new();
        let result = runner.run(
            "/nonexistent/program-12345",
            &[],
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(ExecError::Spawn(_))));
    }
}
