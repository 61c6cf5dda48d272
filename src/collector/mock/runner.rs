//! Canned command runner for tests and non-Linux builds.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crate::collector::exec::{CommandOutput, CommandRunner, ExecError};

/// Command runner returning pre-recorded outputs keyed by program name.
///
/// Programs without a recorded output fail with a spawn error, which is how
/// collectors observe an absent helper.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    outputs: HashMap<String, CommandOutput>,
}

impl MockRunner {
    /// Creates a runner where every invocation fails to spawn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful invocation of `program` producing `stdout`.
    pub fn with_output(mut self, program: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.outputs.insert(
            program.into(),
            CommandOutput {
                stdout: stdout.into(),
                success: true,
            },
        );
        self
    }

    /// Records an invocation of `program` that exits non-zero with empty output.
    pub fn with_failure(mut self, program: impl Into<String>) -> Self {
        self.outputs.insert(
            program.into(),
            CommandOutput {
                stdout: String::new(),
                success: false,
            },
        );
        self
    }
}

impl CommandRunner for MockRunner {
    fn run(
        &self,
        program: &str,
        _args: &[String],
        _timeout: Duration,
    ) -> Result<CommandOutput, ExecError> {
        self.outputs.get(program).cloned().ok_or_else(|| {
            ExecError::Spawn(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no mock output for '{}'", program),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runner_returns_recorded_output() {
        let runner = MockRunner::new().with_output("wc", "42 /proc/net/nf_conntrack\n");
        let out = runner
            .run("wc", &["-l".to_string()], Duration::from_secs(1))
            .unwrap();
        assert!(out.success);
        assert!(out.stdout.starts_with("42"));
    }

    #[test]
    fn test_mock_runner_unknown_program_fails_to_spawn() {
        let runner = MockRunner::new();
        let result = runner.run("cat", &[], Duration::from_secs(1));
        assert!(matches!(result, Err(ExecError::Spawn(_))));
    }
}
