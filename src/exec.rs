//! Synchronous external-command execution
//!
//! All external processes (z/OS copy/tag commands, git, the load-module
//! utility) go through the [`CommandRunner`] trait so that operations can be
//! exercised in tests with a scripted runner instead of a live system.

use std::process::Command;

/// Captured result of one external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code (-1 when terminated without a code).
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Error spawning an external command.
#[derive(Debug, thiserror::Error)]
#[error("failed to run '{program}': {source}")]
pub struct ExecError {
    pub program: String,
    #[source]
    pub source: std::io::Error,
}

/// Seam for running external commands synchronously.
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until exit, capturing both streams.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ExecError>;
}

/// Runner backed by [`std::process::Command`].
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ExecError> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ExecError {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_runner_captures_stdout() {
        let out = SystemRunner.run("echo", &["hello"]).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn test_system_runner_missing_program() {
        let err = SystemRunner.run("definitely-not-a-command-xyz", &[]);
        assert!(err.is_err());
    }
}
