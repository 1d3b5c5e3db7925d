//! Command line interface for kodegen_release.
//!
//! Parses the single version argument, runs the release against the system
//! `git` and build tools, and turns the outcome into an exit code.

mod args;
mod output;
mod release;

pub use args::{Args, ReleaseOptions, USAGE_GUIDANCE, validate_version};
pub use output::OutputManager;
pub use release::{ReleaseSummary, execute_release};

use crate::config::EnvConfig;
use crate::error::{ReleaseError, Result};
use crate::process::SystemRunner;
use clap::Parser;
use clap::error::ErrorKind;

/// Main CLI entry point, returning the process exit code
pub async fn run() -> Result<i32> {
    let output = OutputManager::default();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return Ok(0);
        }
        Err(e) => {
            let _ = e.print();
            output.println("");
            output.println(USAGE_GUIDANCE);
            return Ok(1);
        }
    };

    if let Err(e) = args.validate() {
        output.error(&e.to_string());
        output.println(USAGE_GUIDANCE);
        return Ok(1);
    }

    let env = EnvConfig::from_process();
    let options = ReleaseOptions::from_args(&args, &env);
    let runner = SystemRunner::new();

    let summary = execute_release(&runner, &options, &env, &output).await?;
    output.success(&format!(
        "Successfully created release {} for {}",
        summary.version, summary.repository
    ));
    output.indent(&summary.release_url);
    Ok(0)
}

/// One-line diagnostic naming the failed stage and its cause
pub fn failure_message(error: &ReleaseError) -> String {
    match std::error::Error::source(error) {
        Some(cause) => format!("{} failed: {}", error.stage(), cause),
        None => format!("{} failed: {}", error.stage(), error),
    }
}

/// Print the failed stage, its cause and recovery suggestions
pub fn report_failure(output: &OutputManager, error: &ReleaseError) {
    output.error(&failure_message(error));

    let suggestions = error.recovery_suggestions();
    if !suggestions.is_empty() {
        output.println("\n💡 Recovery suggestions:");
        for suggestion in suggestions {
            output.indent(&format!("• {}", suggestion));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArchiveError, ConfigError};
    use std::path::PathBuf;

    #[test]
    fn failure_message_names_the_stage_once() {
        let error = ReleaseError::from(ConfigError::Missing {
            fields: vec!["GITHUB_TOKEN"],
        });
        assert_eq!(
            failure_message(&error),
            "Configuration failed: missing required configuration: GITHUB_TOKEN"
        );

        let error = ReleaseError::from(ArchiveError::DirectoryNotFound {
            path: PathBuf::from("dist"),
        });
        assert_eq!(
            failure_message(&error),
            "Archive failed: build directory dist not found"
        );
    }
}
