//! Running vendor binaries.

use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Runs an external program to completion and returns its stdout.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Blocking `std::process::Command` runner. No timeout, no retry.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        debug!(program, ?args, "running vendor tool");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| Error::ToolSpawn {
                tool: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::ToolFailed {
                tool: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        debug!(program, bytes = text.len(), "vendor tool finished");
        Ok(text)
    }
}

/// A vendor binary bound to the runner that executes it.
#[derive(Clone, Copy)]
pub struct Tool<'r> {
    binary: &'r str,
    runner: &'r dyn CommandRunner,
}

impl<'r> Tool<'r> {
    pub fn new(binary: &'r str, runner: &'r dyn CommandRunner) -> Self {
        Self { binary, runner }
    }

    pub fn run(&self, args: &[&str]) -> Result<String> {
        self.runner.run(self.binary, args)
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeRunner;
    use super::*;

    #[test]
    fn test_tool_passes_binary_and_args() {
        let runner = FakeRunner::new().respond("ctrl all show", "Smart Array P420i in Slot 0");
        let tool = Tool::new("ssacli", &runner);
        assert_eq!(tool.run(&["ctrl", "all", "show"]).unwrap(), "Smart Array P420i in Slot 0");
        assert_eq!(runner.calls(), vec!["ctrl all show"]);
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let err = SystemRunner
            .run("/nonexistent/raidstat-test-binary", &["list"])
            .unwrap_err();
        assert!(matches!(err, Error::ToolSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_failure() {
        let err = SystemRunner.run("false", &[]).unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let out = SystemRunner.run("echo", &["Controller 1:"]).unwrap();
        assert_eq!(out, "Controller 1:\n");
    }
}
