//! Changelog derived from commit subjects since the previous tag.

use super::GitRepository;
use crate::error::{ChangelogError, Result};
use crate::process::CommandRunner;

/// Generated release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changelog {
    /// Tag the changelog starts after, `None` for a first release
    pub previous_tag: Option<String>,
    /// Newline-separated `- <subject>` entries
    pub body: String,
}

impl Changelog {
    /// Number of entries
    pub fn entries(&self) -> usize {
        self.body.lines().filter(|l| !l.trim().is_empty()).count()
    }
}

/// List commits after the latest reachable tag, or the whole history if
/// there is no tag yet.
pub async fn generate_changelog<R: CommandRunner>(git: &GitRepository<'_, R>) -> Result<Changelog> {
    let previous_tag = git.latest_tag().await;
    match &previous_tag {
        Some(tag) => log::debug!("Generating changelog since {}", tag),
        None => log::debug!("No previous tag, generating changelog from full history"),
    }

    let output = git
        .commit_subjects(previous_tag.as_deref())
        .await
        .map_err(|e| ChangelogError::Log {
            reason: e.to_string(),
        })?;

    if !output.success {
        return Err(ChangelogError::Log {
            reason: output.stderr.trim().to_string(),
        }
        .into());
    }

    Ok(Changelog {
        previous_tag,
        body: output.stdout.trim_end().to_string(),
    })
}
