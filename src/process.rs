//! Subprocess execution seam.
//!
//! The build tool and git are both reached through [`CommandRunner`], so the
//! pipeline can be driven by scripted fakes in tests instead of real binaries.

use std::future::Future;
use std::io;
use std::process::Stdio;

/// Outcome of a finished subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output (empty when inherited)
    pub stdout: String,
    /// Captured standard error (empty when inherited)
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Narrow interface over external program execution
pub trait CommandRunner {
    /// Run `program` to completion, capturing stdout and stderr
    fn output(&self, program: &str, args: &[&str])
    -> impl Future<Output = io::Result<CommandOutput>>;

    /// Run `program` to completion with stdout and stderr inherited from this process
    fn run_inherited(
        &self,
        program: &str,
        args: &[&str],
    ) -> impl Future<Output = io::Result<CommandOutput>>;
}

/// [`CommandRunner`] backed by real processes in the current working directory
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a runner
    pub fn new() -> Self {
        Self
    }

    fn command(&self, program: &str, args: &[&str]) -> io::Result<tokio::process::Command> {
        let resolved = which::which(program).map_err(|e| {
            io::Error::new(io::ErrorKind::NotFound, format!("{program}: {e}"))
        })?;

        let mut cmd = tokio::process::Command::new(resolved);
        cmd.args(args);
        Ok(cmd)
    }
}

impl CommandRunner for SystemRunner {
    async fn output(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        log::debug!("exec: {} {}", program, args.join(" "));
        let output = self.command(program, args)?.output().await?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn run_inherited(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        log::debug!("exec (inherited): {} {}", program, args.join(" "));
        let status = self
            .command(program, args)?
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(CommandOutput {
            success: status.success(),
            code: status.code(),
            ..CommandOutput::default()
        })
    }
}
