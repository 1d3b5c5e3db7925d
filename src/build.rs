//! Runs the configured build command.

use crate::error::{BuildError, Result};
use crate::process::CommandRunner;

/// Split a command line on whitespace into program and arguments.
///
/// No shell quoting is interpreted.
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}

/// Execute `command` with inherited output streams and fail unless it exits successfully
pub async fn run_build<R: CommandRunner>(runner: &R, command: &str) -> Result<()> {
    let (program, args) = split_command(command).ok_or(BuildError::EmptyCommand)?;

    log::info!("Running build: {}", command);
    let output = runner
        .run_inherited(program, &args)
        .await
        .map_err(|source| BuildError::Launch {
            command: command.to_string(),
            source,
        })?;

    if !output.success {
        return Err(BuildError::Failed {
            command: command.to_string(),
            code: output.code,
        }
        .into());
    }

    Ok(())
}
